//! Transformation policy.

use serde::{Deserialize, Serialize};

/// Policy controlling which constituents of a type receive the optional wrapper.
///
/// Struct fields are always wrapped; the switches only affect container elements and keys.
/// With the default policy, everything is wrapped and byte sequences are treated as sequences.
///
/// Options can be set using builder methods, by [applying](Self::with) a sequence of [`Override`]s,
/// or loaded from a config file via `serde`:
///
/// ```
/// use nullify::{NullifyOptions, Override};
///
/// let options = NullifyOptions::new().wrap_list_elements(false);
/// let same_options = NullifyOptions::new().with([Override::WrapListElements(false)]);
/// assert_eq!(options, same_options);
///
/// let options: NullifyOptions = serde_json::from_str(r#"{ "bytes_as_text": true }"#)?;
/// assert!(options.bytes_as_text);
/// assert!(options.wrap_map_keys); // default value
/// # anyhow::Ok(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct NullifyOptions {
    /// Collapse fixed- and variable-size byte sequences (`[u8; N]`, `Vec<u8>`) into optional text
    /// instead of wrapping each byte. Takes precedence over [`Self::wrap_array_elements`]
    /// and [`Self::wrap_list_elements`].
    pub bytes_as_text: bool,
    /// Wrap elements of fixed-size sequences.
    pub wrap_array_elements: bool,
    /// Wrap elements of variable-size sequences.
    pub wrap_list_elements: bool,
    /// Wrap map keys.
    pub wrap_map_keys: bool,
    /// Wrap map values.
    pub wrap_map_values: bool,
}

impl Default for NullifyOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl NullifyOptions {
    /// Creates the default policy.
    pub const fn new() -> Self {
        Self {
            bytes_as_text: false,
            wrap_array_elements: true,
            wrap_list_elements: true,
            wrap_map_keys: true,
            wrap_map_values: true,
        }
    }

    /// Creates a policy suited for decoding external payloads (e.g., JSON bodies of HTTP requests):
    /// byte sequences are treated as text, and container elements / keys are not wrapped.
    pub const fn for_payload_decoding() -> Self {
        Self {
            bytes_as_text: true,
            wrap_array_elements: false,
            wrap_list_elements: false,
            wrap_map_keys: false,
            wrap_map_values: false,
        }
    }

    /// Sets [`Self::bytes_as_text`].
    #[must_use]
    pub const fn bytes_as_text(mut self, value: bool) -> Self {
        self.bytes_as_text = value;
        self
    }

    /// Sets [`Self::wrap_array_elements`].
    #[must_use]
    pub const fn wrap_array_elements(mut self, value: bool) -> Self {
        self.wrap_array_elements = value;
        self
    }

    /// Sets [`Self::wrap_list_elements`].
    #[must_use]
    pub const fn wrap_list_elements(mut self, value: bool) -> Self {
        self.wrap_list_elements = value;
        self
    }

    /// Sets [`Self::wrap_map_keys`].
    #[must_use]
    pub const fn wrap_map_keys(mut self, value: bool) -> Self {
        self.wrap_map_keys = value;
        self
    }

    /// Sets [`Self::wrap_map_values`].
    #[must_use]
    pub const fn wrap_map_values(mut self, value: bool) -> Self {
        self.wrap_map_values = value;
        self
    }

    /// Applies overrides in order; later overrides win over earlier ones.
    #[must_use]
    pub fn with(self, overrides: impl IntoIterator<Item = Override>) -> Self {
        overrides
            .into_iter()
            .fold(self, |options, item| item.apply(options))
    }
}

/// Single override of a [`NullifyOptions`] switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Override {
    /// Overrides [`NullifyOptions::bytes_as_text`].
    BytesAsText(bool),
    /// Overrides [`NullifyOptions::wrap_array_elements`].
    WrapArrayElements(bool),
    /// Overrides [`NullifyOptions::wrap_list_elements`].
    WrapListElements(bool),
    /// Overrides [`NullifyOptions::wrap_map_keys`].
    WrapMapKeys(bool),
    /// Overrides [`NullifyOptions::wrap_map_values`].
    WrapMapValues(bool),
    /// Replaces all switches with [the payload decoding preset](NullifyOptions::for_payload_decoding()).
    PayloadDecoding,
}

impl Override {
    /// Applies this override to the provided options.
    #[must_use]
    pub const fn apply(self, options: NullifyOptions) -> NullifyOptions {
        match self {
            Self::BytesAsText(value) => options.bytes_as_text(value),
            Self::WrapArrayElements(value) => options.wrap_array_elements(value),
            Self::WrapListElements(value) => options.wrap_list_elements(value),
            Self::WrapMapKeys(value) => options.wrap_map_keys(value),
            Self::WrapMapValues(value) => options.wrap_map_values(value),
            Self::PayloadDecoding => NullifyOptions::for_payload_decoding(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_are_applied_in_order() {
        let options = NullifyOptions::new().with([
            Override::WrapMapKeys(false),
            Override::BytesAsText(true),
            Override::WrapMapKeys(true),
        ]);
        assert_eq!(options, NullifyOptions::new().bytes_as_text(true));

        let options =
            NullifyOptions::new().with([Override::PayloadDecoding, Override::WrapMapValues(true)]);
        assert!(options.bytes_as_text);
        assert!(options.wrap_map_values);
        assert!(!options.wrap_map_keys);
        assert!(!options.wrap_list_elements);
        assert!(!options.wrap_array_elements);
    }

    #[test]
    fn explicit_defaults_are_equivalent_to_implicit_ones() {
        let defaults = NullifyOptions::default();
        let explicit = NullifyOptions::new().with([
            Override::BytesAsText(false),
            Override::WrapArrayElements(true),
            Override::WrapListElements(true),
            Override::WrapMapKeys(true),
            Override::WrapMapValues(true),
        ]);
        assert_eq!(defaults, explicit);
        assert_eq!(defaults, NullifyOptions::new().with([]));
    }

    #[test]
    fn loading_options_from_yaml() {
        let yaml = "bytes_as_text: true\nwrap_map_keys: false\n";
        let options: NullifyOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            options,
            NullifyOptions::new().bytes_as_text(true).wrap_map_keys(false)
        );

        let options: NullifyOptions = serde_yaml::from_str("{}").unwrap();
        assert_eq!(options, NullifyOptions::default());
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = serde_json::from_str::<NullifyOptions>(r#"{ "wrap_struct_fields": false }"#)
            .unwrap_err();
        let err = err.to_string();
        assert!(err.contains("unknown field"), "{err}");
    }

    #[test]
    fn serializing_options() {
        let json = serde_json::to_value(NullifyOptions::for_payload_decoding()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "bytes_as_text": true,
                "wrap_array_elements": false,
                "wrap_list_elements": false,
                "wrap_map_keys": false,
                "wrap_map_values": false,
            })
        );
    }
}
