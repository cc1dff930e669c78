//! Checks that crate versions mentioned in docs are up to date.

#[test]
fn readme_is_in_sync() {
    version_sync::assert_markdown_deps_updated!("README.md");
}

#[test]
fn html_root_url_is_in_sync() {
    version_sync::assert_html_root_url_updated!("src/lib.rs");
}
