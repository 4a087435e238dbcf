#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/xml-encode/0.1.0")]
//! This library encodes arbitrary structured values as an XML element tree.
//!
//! Data is first lowered into a `Value` (through `ToValue`, which can be derived for structs);
//! a `Codec` then walks the value and decides for every part how it looks in XML: which element
//! tag a container gets, whether a scalar becomes a child element or an attribute, and whether
//! something is left out entirely.  Every single decision can be replaced on the codec while
//! keeping the default behaviour for everything else.
//!
//! Sequences don't get an element of their own by default; their items become siblings in the
//! surrounding element, while a sequence in a struct field is wrapped in an element named after
//! the field.
//!
//! The encoded tree (`Document` with `Node`s) is independent of any XML library; rendering it to
//! text is done through the `serializer` traits.  For the following XML handling crates adaptors
//! are included if enabled through the equally named features:
//! - [`quick-xml`](https://crates.io/crates/quick-xml)
//!
//! If the `derive` feature is enabled `ToValue` can be derived.

pub mod codec;
pub mod context;
pub mod errors;
pub mod node;
pub mod serializer;
pub mod value;

pub use self::errors::Error;
/// Result alias with out error type included
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "quick-xml")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "quick-xml")))]
pub mod quick_xml;

#[cfg(any(test, feature = "_private-test"))]
mod test_struct;

pub use self::{
	codec::Codec,
	context::Context,
	node::{
		Document,
		Node,
	},
	value::{
		ToValue,
		Value,
	},
};

#[cfg_attr(doc_cfg, doc(cfg(feature = "derive")))]
#[cfg(feature = "derive")]
pub use xml_encode_derive::ToValue;

/// Encode a value with the default `Codec`
pub fn encode_document<T: ToValue + ?Sized>(value: &T) -> Result<Document> {
	Codec::default().to_document(value)
}
