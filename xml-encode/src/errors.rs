//! Error type and helper functions to generate common errors

use crate::context::FrameKind;
use std::fmt;

/// Errors raised while encoding a value or rendering the resulting tree
///
/// Encoding is a pure transformation; every error is a defect in either the input shape or the
/// codec configuration, and is always propagated to the caller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// No strategy matched the value (register one with `Codec::register`)
	#[error("encoding values of type {type_name:?} is not supported")]
	UnsupportedType {
		/// Type descriptor of the rejected value
		type_name: String,
	},
	/// A primitive appeared outside of a sequence item, mapping item or record field
	#[error("primitive of type {type_name:?} can't be encoded {}", Placement(.kind))]
	InvalidPrimitivePlacement {
		/// Type descriptor of the primitive
		type_name: String,
		/// Kind of the frame the primitive was found in (`None` at document level)
		kind: Option<FrameKind>,
	},
	/// An entry of a mapping promoted to attributes isn't a primitive
	#[error("attribute {key:?} can't hold a value of type {type_name:?}")]
	InvalidAttributeValue {
		/// Attribute key
		key: String,
		/// Type descriptor of the offending value
		type_name: String,
	},
	/// An attribute request reached a position without an element to attach it to
	#[error("attribute {key:?} has no element to attach to")]
	OrphanAttribute {
		/// Attribute key
		key: String,
	},
	/// Raised by caller-supplied strategies
	#[error("{0}")]
	Custom(String),
	/// Writing the XML text failed
	#[cfg(feature = "quick-xml")]
	#[cfg_attr(doc_cfg, doc(cfg(feature = "quick-xml")))]
	#[error("rendering failed: {0}")]
	Render(#[from] quick_xml::Error),
	/// Rendered output wasn't valid UTF-8
	#[error("rendered output is not utf-8: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
	/// Build an error from a custom message; meant for caller-supplied strategies
	pub fn custom<T: fmt::Display>(msg: T) -> Self {
		Self::Custom(msg.to_string())
	}
}

struct Placement<'a>(&'a Option<FrameKind>);

impl fmt::Display for Placement<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			Some(kind) => write!(f, "in {} context", kind),
			None => write!(f, "at document level"),
		}
	}
}

pub(crate) fn unsupported_type(type_name: &str) -> Error {
	Error::UnsupportedType { type_name: type_name.into() }
}

pub(crate) fn invalid_primitive_placement(type_name: &str, kind: Option<FrameKind>) -> Error {
	Error::InvalidPrimitivePlacement { type_name: type_name.into(), kind }
}

pub(crate) fn invalid_attribute_value(key: &str, type_name: &str) -> Error {
	Error::InvalidAttributeValue { key: key.into(), type_name: type_name.into() }
}

pub(crate) fn orphan_attribute(key: &str) -> Error {
	Error::OrphanAttribute { key: key.into() }
}
