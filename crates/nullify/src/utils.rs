//! Miscellaneous utils.

use crate::metadata::Field;

/// Joins a dot-separated path with a child segment.
pub(crate) fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_owned()
    } else {
        format!("{parent}.{segment}")
    }
}

/// Returns the name of the field in serialized input, or `None` if the field should be skipped.
///
/// The name is taken from the `json` tag (the part before the first comma), falling back to the Rust field name.
pub(crate) fn serialized_name(field: &Field) -> Option<&str> {
    let Some(tag) = field.tags.get("json") else {
        return Some(field.name.as_ref());
    };
    if tag == "-" {
        return None;
    }
    let name = tag.split_once(',').map_or(tag, |(name, _)| name);
    Some(if name.is_empty() { field.name.as_ref() } else { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ScalarKind, Tags};

    #[test]
    fn joining_paths() {
        assert_eq!(join_path("", "test"), "test");
        assert_eq!(join_path("test", "0"), "test.0");
        assert_eq!(join_path("test.0", "name"), "test.0.name");
    }

    #[test]
    fn extracting_serialized_names() {
        let field = Field::new("user_name", ScalarKind::String.into());
        assert_eq!(serialized_name(&field), Some("user_name"));

        let field = field.with_tags(Tags::new().with("json", "userName,omitempty"));
        assert_eq!(serialized_name(&field), Some("userName"));

        let field = field.with_tags(Tags::new().with("json", ",omitempty"));
        assert_eq!(serialized_name(&field), Some("user_name"));

        let field = field.with_tags(Tags::new().with("json", "-"));
        assert_eq!(serialized_name(&field), None);
    }
}
