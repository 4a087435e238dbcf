//! Serializer adaptor using `quick-xml`

mod serializer;

/// Re-export `quick-xml` crate
pub use quick_xml;

pub use self::serializer::{
	serialize_document,
	serialize_document_pretty,
	serialize_element,
	to_xml_string,
	Serializer,
};
