//! Default tag and attribute resolution
//!
//! All decisions are pure functions of the context; each one can be replaced through the
//! corresponding `Codec::*_with` builder, and the replacement can still call the `default_*`
//! method to fall back.

use crate::{
	codec::Codec,
	context::{
		Context,
		FrameKind,
		Key,
	},
	errors,
	node::{
		Encoded,
		Node,
		Root,
	},
	value::Value,
	Result,
};

const SEQUENCE_ITEM_TAG: &str = "element";
const MAPPING_TAG: &str = "dict";
const RECORD_TAG: &str = "object";

fn key_tag(key: Option<Key<'_>>) -> Option<String> {
	key.map(|key| key.to_string())
}

impl Codec {
	/// Root of a sequence; uses the `sequence_root_with` override if present
	pub fn sequence_root(&self, context: &Context<'_>) -> Result<Root> {
		match &self.sequence_root {
			Some(root) => root(self, context),
			None => self.default_sequence_root(context),
		}
	}

	/// Default sequence root
	///
	/// A sequence that is the value of a mapping entry or record field is inlined under the key
	/// of that entry.  Otherwise the items are returned as bare siblings, unless an
	/// `anonymous_sequence_tag` is configured and the sequence sits directly inside another
	/// sequence.
	pub fn default_sequence_root(&self, context: &Context<'_>) -> Result<Root> {
		if self.skip_empty {
			if let Some(Value::Sequence(items)) = context.current_value() {
				if items.is_empty() {
					return Ok(Root::Skip);
				}
			}
		}
		let parent = match context.parent_frame() {
			Some(parent) => parent,
			None => return Ok(Root::Bare),
		};
		if parent.kind().is_keyed_item() {
			if let Some(tag) = key_tag(parent.key()) {
				return Ok(Root::Element(Node::new(tag)));
			}
		}
		match (&self.anonymous_sequence_tag, parent.kind()) {
			(Some(tag), FrameKind::SequenceItem) => Ok(Root::Element(Node::new(tag.clone()))),
			_ => Ok(Root::Bare),
		}
	}

	/// Root of a mapping; uses the `mapping_root_with` override if present
	pub fn mapping_root(&self, context: &Context<'_>) -> Result<Root> {
		match &self.mapping_root {
			Some(root) => root(self, context),
			None => self.default_mapping_root(context),
		}
	}

	/// Default mapping root
	///
	/// Tag is the key of the enclosing entry or field, falling back to `dict`.
	pub fn default_mapping_root(&self, context: &Context<'_>) -> Result<Root> {
		if self.skip_empty {
			if let Some(Value::Mapping(mapping)) = context.current_value() {
				if mapping.is_empty() {
					return Ok(Root::Skip);
				}
			}
		}
		let parent = context.parent_frame().filter(|f| f.kind().is_keyed_item());
		let current = context.current_frame().filter(|f| f.kind().is_keyed_item());
		let tag = match (parent, current) {
			(Some(frame), _) | (None, Some(frame)) => key_tag(frame.key()),
			(None, None) => None,
		};
		Ok(Root::Element(Node::new(tag.unwrap_or_else(|| MAPPING_TAG.to_owned()))))
	}

	/// Root of a record; uses the `record_root_with` override if present
	pub fn record_root(&self, context: &Context<'_>) -> Result<Root> {
		match &self.record_root {
			Some(root) => root(self, context),
			None => self.default_record_root(context),
		}
	}

	/// Default record root
	///
	/// Tag is the explicit tag of the record, or its lower-cased type name; `object` if the
	/// record is anonymous.
	pub fn default_record_root(&self, context: &Context<'_>) -> Result<Root> {
		let record = match context.current_frame() {
			Some(frame) if frame.kind() == FrameKind::Record => match frame.value() {
				Value::Record(record) => Some(record),
				_ => None,
			},
			_ => None,
		};
		let tag = record
			.map(|r| match r.tag() {
				Some(tag) => tag.to_owned(),
				None => r.type_name().to_lowercase(),
			})
			.filter(|tag| !tag.is_empty())
			.unwrap_or_else(|| RECORD_TAG.to_owned());
		Ok(Root::Element(Node::new(tag)))
	}

	/// Encode a primitive; uses the `primitive_with` override if present
	pub fn encode_primitive<'v>(&self, value: &'v Value, context: &Context<'v>) -> Result<Encoded> {
		match &self.primitive {
			Some(primitive) => primitive(self, value, context),
			None => self.default_encode_primitive(value, context),
		}
	}

	/// Default primitive encoding
	///
	/// Primitives must be container items.  Record fields registered for promotion become
	/// attributes; everything else becomes a leaf element tagged by `primitive_item_tag`.
	pub fn default_encode_primitive<'v>(
		&self,
		value: &'v Value,
		context: &Context<'v>,
	) -> Result<Encoded> {
		let key = match context.current_key() {
			Some(key) => key,
			None => {
				return Err(errors::invalid_primitive_placement(
					value.type_name(),
					context.current_kind(),
				))
			},
		};
		let text = value.as_text().ok_or_else(|| errors::unsupported_type(value.type_name()))?;
		if self.is_promoted(context) {
			return Ok(Encoded::attribute(key.to_string(), text));
		}
		let tag = self.primitive_item_tag(value, context)?;
		Ok(Encoded::node(Node::with_text(tag, text)))
	}

	/// Tag for a primitive item; uses the `primitive_item_tag_with` override if present
	pub fn primitive_item_tag(&self, value: &Value, context: &Context<'_>) -> Result<String> {
		match &self.primitive_item_tag {
			Some(tag) => tag(self, value, context),
			None => self.default_primitive_item_tag(value, context),
		}
	}

	/// Default primitive tag: `element` for sequence items, the key otherwise
	pub fn default_primitive_item_tag(&self, value: &Value, context: &Context<'_>) -> Result<String> {
		match (context.current_kind(), context.current_key()) {
			(Some(FrameKind::SequenceItem), _) => Ok(SEQUENCE_ITEM_TAG.to_owned()),
			(Some(_), Some(key)) => Ok(key.to_string()),
			(kind, _) => Err(errors::invalid_primitive_placement(value.type_name(), kind)),
		}
	}

	/// Whether the current value is a record field registered for attribute promotion
	///
	/// Fields are registered either on the record itself (`#[xml_encode(attr)]`,
	/// `Record::promote`) or per type on the codec (`Codec::attributes`).
	pub fn is_promoted(&self, context: &Context<'_>) -> bool {
		let key = match context.current_frame() {
			Some(frame) if frame.kind() == FrameKind::RecordFieldItem => {
				match frame.key().and_then(|key| key.as_name()) {
					Some(key) => key,
					None => return false,
				}
			},
			_ => return false,
		};
		let record = match context.parent_frame().map(|f| f.value()) {
			Some(Value::Record(record)) => record,
			_ => return false,
		};
		if record.is_attribute(key) {
			return true;
		}
		record
			.type_id()
			.and_then(|id| self.attributes.get(&id))
			.map_or(false, |fields| fields.iter().any(|f| f == key))
	}
}
