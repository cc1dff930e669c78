//! Procedural macros for `nullify`.
//!
//! All macros in this crate are re-exported from the `nullify` crate. See its docs for more details
//! and the examples of usage.

// Documentation settings
#![doc(html_root_url = "https://docs.rs/nullify-derive/0.1.0")]
// General settings
#![recursion_limit = "128"]
// Linter settings
#![allow(missing_docs)] // Adding docs here would interfere with docs in the main crate

extern crate proc_macro;

use proc_macro::TokenStream;

mod describe;
mod utils;

#[proc_macro_derive(Describe, attributes(describe))]
pub fn describe(input: TokenStream) -> TokenStream {
    describe::impl_describe(input)
}
