//! Derive `xml-encode` trait implementations
//!
//! Deriving `ToValue` lowers a struct into a record value; it supports the following attributes
//! on the struct:
//! - `#[xml_encode(tag = "...")]`: XML tag; defaults to the lower-cased struct name
//! - `#[xml_encode(crate = "...")]`: Name of `xml-encode` crate in local scope; defaults to
//!   `xml_encode`
//!
//! And the following attributes on struct fields:
//! - `#[xml_encode(attr)]`: Render field as attribute of the record element
//! - `#[xml_encode(rename = "...")]`: Key to use instead of the field name
//! - `#[xml_encode(skip)]`: Don't encode the field at all
//!
//! Multiple attributes can be combined like `#[xml_encode(attr, rename = "...")]`.
//!
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/xml-encode-derive/0.1.0")]

extern crate proc_macro;

mod element;
mod to_value;

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

use crate::element::RecordInput;

/// Derive `xml-encode::value::ToValue`
#[proc_macro_derive(ToValue, attributes(xml_encode))]
pub fn derive_to_value(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	TokenStream::from(match RecordInput::from_derive_input(&input) {
		Ok(input) => to_value::derive_to_value(&input),
		Err(e) => e.write_errors(),
	})
}
