use std::collections::HashMap;

use nullify::{Describe, Nullified, NullifyOptions};

#[derive(Describe)]
struct Envelope<'a, T, const N: usize> {
    #[describe(tag(json = "body"))]
    body: T,
    #[describe(tag(json = "digest"))]
    digest: [u8; N],
    #[describe(skip)]
    source: &'a std::path::Path,
}

#[derive(Describe)]
struct Headers {
    values: HashMap<String, Vec<String>>,
}

fn main() {
    let nullified = Nullified::of::<Envelope<'static, Headers, 32>>(&NullifyOptions::default());
    assert!(nullified.ty().is_optional());
}
