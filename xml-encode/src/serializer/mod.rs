//! Traits to render the encoded element tree
//!
//! `Node` and `Document` implement `Element`; to render them with an XML library you need to
//! implement `Serializer` (an adaptor for `quick-xml` is included behind the equally named
//! feature).

mod node;

use crate::Result;

/// Element of an encoded tree
pub trait Element {
	/// XML tag
	fn tag(&self) -> &str;

	/// Feed attributes first, then text and child elements to the serializer.
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<()>;
}

/// Receives the content of one element
///
/// Values are passed unescaped; escaping is the job of the serializer.
pub trait Serializer {
	/// Add an attribute; only valid before any text or child element
	fn serialize_attribute(&mut self, key: &str, value: &str) -> Result<()>;

	/// Add inner text
	fn serialize_text(&mut self, text: &str) -> Result<()>;

	/// Add a child element; the serializer calls `Element::serialize` on it
	fn serialize_element<E: Element>(&mut self, element: &E) -> Result<()>;
}
