use crate::{
	codec::Codec,
	context::{
		Context,
		FrameKind,
		Key,
	},
	errors,
	node::{
		Attribute,
		Encoded,
		Root,
	},
	value::Value,
	Result,
};
use std::rc::Rc;

type RootResolver = fn(&Codec, &Context<'_>) -> Result<Root>;

impl Codec {
	/// Encode a sequence container
	pub fn encode_sequence<'v>(&self, value: &'v Value, context: &Context<'v>) -> Result<Encoded> {
		let items = match value {
			Value::Sequence(items) => items,
			_ => return Err(errors::unsupported_type(value.type_name())),
		};
		self.encode_container(
			value,
			Self::sequence_root,
			FrameKind::Sequence,
			FrameKind::SequenceItem,
			items.iter().enumerate().map(|(index, item)| (Key::Index(index), item)),
			context,
		)
	}

	/// Encode a mapping container
	///
	/// If the mapping is the value of a record field promoted to attributes, all entries become
	/// attributes of the record element instead.
	pub fn encode_mapping<'v>(&self, value: &'v Value, context: &Context<'v>) -> Result<Encoded> {
		let mapping = match value {
			Value::Mapping(mapping) => mapping,
			_ => return Err(errors::unsupported_type(value.type_name())),
		};
		if self.is_promoted(context) {
			let attributes = mapping
				.iter()
				.filter(|(_, item)| !item.is_none())
				.map(|(key, item)| match item.as_text() {
					Some(text) => Ok(Attribute::new(key, text)),
					None => Err(errors::invalid_attribute_value(key, item.type_name())),
				})
				.collect::<Result<Vec<_>>>()?;
			return Ok(Encoded::Attributes(attributes));
		}
		self.encode_container(
			value,
			Self::mapping_root,
			FrameKind::Mapping,
			FrameKind::MappingItem,
			mapping.iter().map(|(key, item)| (Key::Name(key), item)),
			context,
		)
	}

	/// Encode a record container
	pub fn encode_record<'v>(&self, value: &'v Value, context: &Context<'v>) -> Result<Encoded> {
		let record = match value {
			Value::Record(record) => record,
			_ => return Err(errors::unsupported_type(value.type_name())),
		};
		self.encode_container(
			value,
			Self::record_root,
			FrameKind::Record,
			FrameKind::RecordFieldItem,
			record.fields().map(|(key, item)| (Key::Name(key), item)),
			context,
		)
	}

	fn encode_container<'v, I>(
		&self,
		value: &'v Value,
		resolve_root: RootResolver,
		kind: FrameKind,
		item_kind: FrameKind,
		items: I,
		context: &Context<'v>,
	) -> Result<Encoded>
	where
		I: IntoIterator<Item = (Key<'v>, &'v Value)>,
	{
		let mut element = match resolve_root(self, &context.child(kind, value, None, None))? {
			Root::Skip => {
				log::debug!("skipping {} at depth {}", kind, context.depth());
				return Ok(Encoded::skip());
			},
			Root::Element(node) => Some(node),
			Root::Bare => None,
		};

		let snapshot = element.as_ref().map(|node| Rc::new(node.shallow_clone()));
		let context = context.child(kind, value, None, snapshot.clone());
		let mut siblings = Vec::new();

		for (key, item) in items {
			let item_context = context.child(item_kind, item, Some(key), snapshot.clone());
			match self.encode(item, &item_context)? {
				Encoded::Nodes(nodes) => match &mut element {
					Some(node) => node.extend(nodes),
					None => siblings.extend(nodes),
				},
				Encoded::Attributes(attributes) => match &mut element {
					Some(node) => {
						for attribute in attributes {
							node.set_attribute(attribute.key, attribute.value);
						}
					},
					None => {
						if let Some(attribute) = attributes.first() {
							return Err(errors::orphan_attribute(&attribute.key));
						}
					},
				},
			}
		}

		Ok(Encoded::Nodes(match element {
			Some(node) => vec![node],
			None => siblings,
		}))
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		node::Node,
		value::{
			Mapping,
			Record,
		},
		Error,
	};

	fn nodes(encoded: Encoded) -> Vec<Node> {
		match encoded {
			Encoded::Nodes(nodes) => nodes,
			other => panic!("expected nodes, got {:?}", other),
		}
	}

	fn tags(nodes: &[Node]) -> Vec<&str> {
		nodes.iter().map(Node::tag).collect()
	}

	#[test]
	fn bare_sequence_flattens() {
		let codec = Codec::default();
		let value = Value::Sequence(vec![
			Value::Int(1),
			Value::Sequence(vec![Value::Int(2), Value::Int(3)]),
			Value::None,
			Value::Int(4),
		]);
		let result = nodes(codec.encode(&value, &Context::new()).unwrap());
		let texts: Vec<_> = result.iter().filter_map(Node::text).collect();
		assert_eq!(tags(&result), ["element"; 4]);
		assert_eq!(texts, ["1", "2", "3", "4"]);
	}

	#[test]
	fn mapping_keeps_insertion_order() {
		let codec = Codec::default();
		let value: Value = Mapping::new().entry("b", 2).entry("a", 1).entry("c", None::<u8>).into();
		let result = nodes(codec.encode(&value, &Context::new()).unwrap());
		assert_eq!(tags(&result), ["dict"]);
		assert_eq!(tags(result[0].children()), ["b", "a"]);
	}

	#[test]
	fn record_merges_attributes() {
		let codec = Codec::default();
		let value: Value = Record::new("Coordinate")
			.field("x", 15)
			.field("color", "purple")
			.field("y", 33)
			.attribute("x")
			.attribute("y")
			.into();
		let result = nodes(codec.encode(&value, &Context::new()).unwrap());
		let node = &result[0];
		assert_eq!(node.tag(), "coordinate");
		assert_eq!(node.attribute("x"), Some("15"));
		assert_eq!(node.attribute("y"), Some("33"));
		assert_eq!(tags(node.children()), ["color"]);
		assert!(node.child("x").is_none());
	}

	#[test]
	fn promoted_mapping_becomes_attributes() {
		let codec = Codec::default();
		let value: Value = Record::new("Wall")
			.field("color", "purple")
			.field("attr_dict", Mapping::new().entry("ayy", "lmao"))
			.attribute("attr_dict")
			.into();
		let result = nodes(codec.encode(&value, &Context::new()).unwrap());
		assert_eq!(result[0].attribute("ayy"), Some("lmao"));
		assert_eq!(tags(result[0].children()), ["color"]);

		let value: Value = Record::new("Wall")
			.field("attr_dict", Mapping::new().entry("nested", vec![1]))
			.attribute("attr_dict")
			.into();
		match codec.encode(&value, &Context::new()) {
			Err(Error::InvalidAttributeValue { key, .. }) => assert_eq!(key, "nested"),
			other => panic!("unexpected: {:?}", other),
		}
	}

	#[test]
	fn attribute_in_bare_sequence_is_an_error() {
		let codec = Codec::default().primitive_with(|_, value, context| {
			Ok(Encoded::attribute(context.current_key().unwrap().to_string(), value.as_text().unwrap()))
		});
		let value = Value::Sequence(vec![Value::Int(1)]);
		match codec.encode(&value, &Context::new()) {
			Err(Error::OrphanAttribute { key }) => assert_eq!(key, "0"),
			other => panic!("unexpected: {:?}", other),
		}
	}

	#[test]
	fn skip_empty_sequence_field() {
		let value: Value = Record::new("Thing").field("a", Vec::<u32>::new()).field("b", 1).into();

		let result = nodes(Codec::default().encode(&value, &Context::new()).unwrap());
		assert_eq!(tags(result[0].children()), ["a", "b"]);

		let codec = Codec::default().skip_empty(true);
		let result = nodes(codec.encode(&value, &Context::new()).unwrap());
		assert_eq!(tags(result[0].children()), ["b"]);
	}

	#[test]
	fn colliding_attributes_last_write_wins() {
		let value: Value = Record::new("Wall")
			.field("ayy", "first")
			.field("attr_dict", Mapping::new().entry("ayy", "second"))
			.attribute("ayy")
			.attribute("attr_dict")
			.into();
		let result = nodes(Codec::default().encode(&value, &Context::new()).unwrap());
		let attributes: Vec<_> = result[0].attributes().collect();
		assert_eq!(attributes, [("ayy", "second")]);
		assert!(result[0].children().is_empty());
	}

	#[test]
	fn skipped_root() {
		let codec = Codec::default().record_root_with(|_, _| Ok(Root::Skip));
		let value = Value::Sequence(vec![Record::new("Address").into(), Value::Int(1)]);
		let result = nodes(codec.encode(&value, &Context::new()).unwrap());
		assert_eq!(tags(&result), ["element"]);
	}

	#[test]
	fn item_frames_carry_container_node() {
		let codec = Codec::default().primitive_item_tag_with(|_, _, context| {
			let parent = context.current_frame().and_then(|f| f.node()).map(Node::tag);
			Ok(format!("{}-item", parent.unwrap_or("none")))
		});
		let value: Value = Mapping::new().entry("a", 1).into();
		let result = nodes(codec.encode(&value, &Context::new()).unwrap());
		assert_eq!(tags(result[0].children()), ["dict-item"]);
	}
}
