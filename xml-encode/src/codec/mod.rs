//! Encoding engine
//!
//! A `Codec` turns a `Value` into elements.  For each value it first picks a `Strategy`
//! (`classify`), then either encodes a primitive, or walks a container: resolves the container's
//! root element, encodes every item with a descended `Context`, and merges the item results into
//! the root (attribute requests become attributes, nodes become children).
//!
//! Every decision is a hook: the `*_with` builder methods replace a single step, while all other
//! steps keep their default behaviour.  Replacements get the codec passed in, so they can recurse
//! (`Codec::encode`) or fall back to the default (`Codec::default_*`).
//!
//! ```
//! use xml_encode::{
//! 	codec::Codec,
//! 	context::FrameKind,
//! 	node::Encoded,
//! 	value::{Record, Value},
//! };
//!
//! // numbers and booleans inside records become attributes
//! let codec = Codec::default().primitive_with(|codec, value, context| {
//! 	let in_record = context.parent_frame().map(|f| f.kind()) == Some(FrameKind::Record);
//! 	if in_record && value.is_numeric_or_bool() {
//! 		if let (Some(key), Some(text)) = (context.current_key(), value.as_text()) {
//! 			return Ok(Encoded::attribute(key.to_string(), text));
//! 		}
//! 	}
//! 	codec.default_encode_primitive(value, context)
//! });
//!
//! let value = Value::Record(Record::new("Person").field("id", 811).field("name", "pos"));
//! let document = codec.encode_document(&value).unwrap();
//! assert_eq!(document.root().attribute("id"), Some("811"));
//! assert_eq!(document.root().children()[0].tag(), "name");
//! ```

mod classify;
mod container;
mod policy;

use crate::{
	context::Context,
	errors,
	node::{
		Document,
		Encoded,
		Node,
		Root,
	},
	value::{
		ToValue,
		Value,
	},
	Result,
};
use std::{
	any::{
		Any,
		TypeId,
	},
	borrow::Cow,
	collections::HashMap,
	fmt,
	sync::Arc,
};

pub use self::classify::Strategy;

/// Replacement for `Codec::default_classify`
pub type ClassifyFn = dyn Fn(&Codec, &Value, &Context<'_>) -> Result<Strategy> + Send + Sync;

/// Strategy encoding a single value (registered per type, or replacing primitive encoding)
pub type StrategyFn =
	dyn for<'v> Fn(&Codec, &'v Value, &Context<'v>) -> Result<Encoded> + Send + Sync;

/// Replacement for one of the `Codec::default_*_root` resolvers
pub type RootFn = dyn Fn(&Codec, &Context<'_>) -> Result<Root> + Send + Sync;

/// Replacement for `Codec::default_primitive_item_tag`
pub type TagFn = dyn Fn(&Codec, &Value, &Context<'_>) -> Result<String> + Send + Sync;

const DEFAULT_ROOT_TAG: &str = "document";

/// Encoding configuration and entry point
///
/// `Codec::default()` gives the plain behaviour; the builder methods override single steps.  A
/// codec holds no per-call state, and can be shared between threads.
#[derive(Clone)]
pub struct Codec {
	classify: Option<Arc<ClassifyFn>>,
	type_strategies: HashMap<TypeId, Arc<StrategyFn>>,
	sequence_root: Option<Arc<RootFn>>,
	mapping_root: Option<Arc<RootFn>>,
	record_root: Option<Arc<RootFn>>,
	primitive: Option<Arc<StrategyFn>>,
	primitive_item_tag: Option<Arc<TagFn>>,
	attributes: HashMap<TypeId, Vec<String>>,
	root_tag: Cow<'static, str>,
	skip_empty: bool,
	anonymous_sequence_tag: Option<Cow<'static, str>>,
}

impl Default for Codec {
	fn default() -> Self {
		Self {
			classify: None,
			type_strategies: HashMap::new(),
			sequence_root: None,
			mapping_root: None,
			record_root: None,
			primitive: None,
			primitive_item_tag: None,
			attributes: HashMap::new(),
			root_tag: Cow::Borrowed(DEFAULT_ROOT_TAG),
			skip_empty: false,
			anonymous_sequence_tag: None,
		}
	}
}

impl fmt::Debug for Codec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Codec")
			.field("classify", &self.classify.is_some())
			.field("type_strategies", &self.type_strategies.len())
			.field("sequence_root", &self.sequence_root.is_some())
			.field("mapping_root", &self.mapping_root.is_some())
			.field("record_root", &self.record_root.is_some())
			.field("primitive", &self.primitive.is_some())
			.field("primitive_item_tag", &self.primitive_item_tag.is_some())
			.field("attributes", &self.attributes.len())
			.field("root_tag", &self.root_tag)
			.field("skip_empty", &self.skip_empty)
			.field("anonymous_sequence_tag", &self.anonymous_sequence_tag)
			.finish()
	}
}

impl Codec {
	/// Codec with default behaviour
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace classification
	pub fn classify_with<F>(mut self, classify: F) -> Self
	where
		F: Fn(&Codec, &Value, &Context<'_>) -> Result<Strategy> + Send + Sync + 'static,
	{
		self.classify = Some(Arc::new(classify));
		self
	}

	/// Register a strategy for values of type `T`
	///
	/// Applies to `Value::opaque` values wrapping a `T` and to records built for `T`; checked
	/// before the shape of the value is looked at.
	///
	/// Records only know their type if they carry a `TypeId` (`Record::of`,
	/// `Record::with_type_id`).  The derive records it only for structs without generic
	/// parameters; registrations never match records of generic structs.
	pub fn register<T: Any, F>(mut self, strategy: F) -> Self
	where
		F: for<'v> Fn(&Codec, &'v Value, &Context<'v>) -> Result<Encoded> + Send + Sync + 'static,
	{
		self.type_strategies.insert(TypeId::of::<T>(), Arc::new(strategy));
		self
	}

	/// Render the given fields of record type `T` as attributes
	///
	/// Like `register` this is matched by `TypeId`, and has no effect on records of generic
	/// structs (the derive doesn't record their type); mark those fields with
	/// `#[xml_encode(attr)]` instead.
	pub fn attributes<T: Any, I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.attributes
			.entry(TypeId::of::<T>())
			.or_default()
			.extend(fields.into_iter().map(Into::into));
		self
	}

	/// Replace sequence root resolution
	pub fn sequence_root_with<F>(mut self, root: F) -> Self
	where
		F: Fn(&Codec, &Context<'_>) -> Result<Root> + Send + Sync + 'static,
	{
		self.sequence_root = Some(Arc::new(root));
		self
	}

	/// Replace mapping root resolution
	pub fn mapping_root_with<F>(mut self, root: F) -> Self
	where
		F: Fn(&Codec, &Context<'_>) -> Result<Root> + Send + Sync + 'static,
	{
		self.mapping_root = Some(Arc::new(root));
		self
	}

	/// Replace record root resolution
	pub fn record_root_with<F>(mut self, root: F) -> Self
	where
		F: Fn(&Codec, &Context<'_>) -> Result<Root> + Send + Sync + 'static,
	{
		self.record_root = Some(Arc::new(root));
		self
	}

	/// Replace primitive encoding
	pub fn primitive_with<F>(mut self, primitive: F) -> Self
	where
		F: for<'v> Fn(&Codec, &'v Value, &Context<'v>) -> Result<Encoded> + Send + Sync + 'static,
	{
		self.primitive = Some(Arc::new(primitive));
		self
	}

	/// Replace the tag used for primitive items
	pub fn primitive_item_tag_with<F>(mut self, tag: F) -> Self
	where
		F: Fn(&Codec, &Value, &Context<'_>) -> Result<String> + Send + Sync + 'static,
	{
		self.primitive_item_tag = Some(Arc::new(tag));
		self
	}

	/// Tag of the element wrapping multiple (or no) top-level elements; `document` by default
	pub fn root_tag<T: Into<Cow<'static, str>>>(mut self, tag: T) -> Self {
		self.root_tag = tag.into();
		self
	}

	/// Skip empty sequences and mappings in the default root resolvers
	pub fn skip_empty(mut self, skip_empty: bool) -> Self {
		self.skip_empty = skip_empty;
		self
	}

	/// Wrap sequences that sit directly inside another sequence in an element with this tag
	///
	/// By default such sequences are flattened into the outer sequence.
	pub fn anonymous_sequence_tag<T: Into<Cow<'static, str>>>(mut self, tag: T) -> Self {
		self.anonymous_sequence_tag = Some(tag.into());
		self
	}

	/// Encode a value at the position described by `context`
	pub fn encode<'v>(&self, value: &'v Value, context: &Context<'v>) -> Result<Encoded> {
		let strategy = self.classify(value, context)?;
		log::trace!(
			"encoding {} as {:?} at depth {}",
			value.type_name(),
			strategy,
			context.depth()
		);
		match strategy {
			Strategy::Skip => Ok(Encoded::skip()),
			Strategy::Primitive => self.encode_primitive(value, context),
			Strategy::Sequence => self.encode_sequence(value, context),
			Strategy::Mapping => self.encode_mapping(value, context),
			Strategy::Record => self.encode_record(value, context),
			Strategy::Custom(strategy) => strategy(self, value, context),
		}
	}

	/// Encode a value into a document
	///
	/// A single resulting element becomes the document root; otherwise all elements are wrapped
	/// in an element tagged with `root_tag`.
	pub fn encode_document(&self, value: &Value) -> Result<Document> {
		let mut nodes = match self.encode(value, &Context::new())? {
			Encoded::Nodes(nodes) => nodes,
			Encoded::Attributes(attributes) => match attributes.first() {
				Some(attribute) => return Err(errors::orphan_attribute(&attribute.key)),
				None => Vec::new(),
			},
		};
		if nodes.len() == 1 {
			if let Some(root) = nodes.pop() {
				return Ok(Document::new(root));
			}
		}
		log::debug!("wrapping {} top-level elements in <{}>", nodes.len(), self.root_tag);
		let mut root = Node::new(self.root_tag.clone());
		root.extend(nodes);
		Ok(Document::new(root))
	}

	/// Lower a rust value and encode it into a document
	pub fn to_document<T: ToValue + ?Sized>(&self, value: &T) -> Result<Document> {
		self.encode_document(&value.to_value())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		context::FrameKind,
		test_struct::*,
		value::{
			Mapping,
			Record,
		},
		Error,
	};

	fn children_tags(node: &Node) -> Vec<&str> {
		node.children().iter().map(Node::tag).collect()
	}

	#[test]
	fn multi_root_wrapping() {
		let document = Codec::default().to_document(&[1, 2, 3]).unwrap();
		let root = document.root();
		assert_eq!(root.tag(), "document");
		assert_eq!(children_tags(root), ["element"; 3]);
		let texts: Vec<_> = root.children().iter().filter_map(Node::text).collect();
		assert_eq!(texts, ["1", "2", "3"]);
	}

	#[test]
	fn empty_wrapper() {
		let codec = Codec::default().root_tag("room");
		for value in [Value::None, Value::Sequence(Vec::new())] {
			let document = codec.encode_document(&value).unwrap();
			assert_eq!(document.root().tag(), "room");
			assert!(document.root().children().is_empty());
		}
	}

	#[test]
	fn single_root_is_kept() {
		let document = Codec::default().to_document(&Address::turku()).unwrap();
		assert_eq!(document.root().tag(), "address");
		assert_eq!(children_tags(document.root()), ["city", "state"]);
	}

	#[test]
	fn primitive_document_is_an_error() {
		match Codec::default().to_document(&5) {
			Err(Error::InvalidPrimitivePlacement { kind: None, .. }) => (),
			other => panic!("unexpected: {:?}", other),
		}
	}

	#[test]
	fn idempotent() {
		let codec = Codec::default();
		let person = Person::posankka();
		assert_eq!(codec.to_document(&person).unwrap(), codec.to_document(&person).unwrap());
	}

	#[test]
	fn person() {
		let document = Codec::default().to_document(&Person::posankka()).unwrap();
		let root = document.root();
		assert_eq!(root.tag(), "person");
		// records are tagged by their type name, even below a field
		assert_eq!(
			children_tags(root),
			["id", "first_name", "last_name", "address", "addresses", "cool", "age", "extra"],
		);
		// sequence inlined under its field
		let addresses = root.child("addresses").unwrap();
		assert_eq!(children_tags(addresses), ["address", "address"]);
		assert_eq!(addresses.children()[1].child("city").and_then(Node::text), Some("espoo"));
		// mapping below a field takes the field name
		let extra = root.child("extra").unwrap();
		assert_eq!(children_tags(extra), ["hello"]);
		assert_eq!(extra.child("hello").and_then(Node::text), Some("world"));
	}

	#[test]
	fn skipped_option_keeps_sibling_order() {
		let mut person = Person::posankka();
		person.main_address = None;
		let document = Codec::default().to_document(&person).unwrap();
		assert_eq!(
			children_tags(document.root()),
			["id", "first_name", "last_name", "addresses", "cool", "age", "extra"],
		);
	}

	#[test]
	fn numeric_fields_as_attributes() {
		let codec = Codec::default().primitive_with(|codec, value, context| {
			let in_record = context.parent_frame().map(|f| f.kind()) == Some(FrameKind::Record);
			match (in_record && value.is_numeric_or_bool(), context.current_key(), value.as_text()) {
				(true, Some(key), Some(text)) => Ok(Encoded::attribute(key.to_string(), text)),
				_ => codec.default_encode_primitive(value, context),
			}
		});
		let document = codec.to_document(&Person::posankka()).unwrap();
		let root = document.root();
		assert_eq!(root.attribute("id"), Some("811"));
		assert_eq!(root.attribute("cool"), Some("true"));
		assert_eq!(root.attribute("age"), Some("332"));
		assert!(root.child("id").is_none());
		assert_eq!(root.child("first_name").and_then(Node::text), Some("pos"));
	}

	#[test]
	fn derived_attributes() {
		let coords = vec![
			Coordinate { x: 15, y: 33, color: "purple".into() },
			Coordinate { x: 25, y: 13, color: "yes, please".into() },
		];
		let document = Codec::default().root_tag("coordinates").to_document(&coords).unwrap();
		let root = document.root();
		assert_eq!(root.tag(), "coordinates");
		assert_eq!(children_tags(root), ["coordinate", "coordinate"]);
		let first = &root.children()[0];
		let attributes: Vec<_> = first.attributes().collect();
		assert_eq!(attributes, [("x", "15"), ("y", "33")]);
		assert_eq!(children_tags(first), ["color"]);
	}

	#[test]
	fn registered_attributes() {
		let codec = Codec::default().attributes::<Address, _, _>(vec!["state"]);
		let document = codec.to_document(&Address::turku()).unwrap();
		assert_eq!(document.root().attribute("state"), Some("ulkomaat"));
		assert_eq!(children_tags(document.root()), ["city"]);
	}

	#[test]
	fn registrations_skip_generic_records() {
		let labeled = Labeled { label: "answer".to_string(), value: 42u32 };
		let codec = Codec::default()
			.attributes::<Labeled<u32>, _, _>(vec!["label"])
			.register::<Labeled<u32>, _>(|_, _, _| Ok(Encoded::skip()));
		let document = codec.to_document(&labeled).unwrap();
		let root = document.root();
		assert_eq!(root.tag(), "labeled");
		assert_eq!(root.attribute("label"), None);
		assert_eq!(children_tags(root), ["label", "value"]);
	}

	#[test]
	fn registered_type_strategy() {
		let codec = Codec::default().register::<Date, _>(|codec, value, context| {
			let date = value.downcast_ref::<Date>().ok_or_else(|| Error::custom("not a date"))?;
			let text = Value::Str(date.to_string());
			codec.encode_primitive(&text, context)
		});
		let value: Value = Mapping::new().entry("born", Value::opaque(Date(1999, 3, 7))).into();
		let document = codec.encode_document(&value).unwrap();
		assert_eq!(document.root().child("born").and_then(Node::text), Some("1999-03-07"));

		match Codec::default().encode_document(&value) {
			Err(Error::UnsupportedType { type_name }) => assert!(type_name.ends_with("Date")),
			other => panic!("unexpected: {:?}", other),
		}
	}

	#[test]
	fn wall_attribute_dict() {
		let rooms = vec![
			Wall::new("purple", "lmao"),
			Wall::new("yes, please", "lmes"),
		];
		let document = Codec::default().root_tag("room").to_document(&rooms).unwrap();
		let walls = document.root().children();
		assert_eq!(walls[0].attribute("ayy"), Some("lmao"));
		assert_eq!(walls[1].attribute("ayy"), Some("lmes"));
		assert_eq!(children_tags(&walls[0]), ["color"]);
	}

	#[test]
	fn no_records() {
		let value = vec![
			Mapping::new()
				.entry("hello", "world")
				.entry("adjectives", ("hernekeitto", ("viina", "teline"), "johannes"))
				.into(),
			vec![1.to_value(), 2.to_value(), "hello".to_value(), Mapping::new().entry("nnep", "pen").into()]
				.to_value(),
			"aha!".to_value(),
		];
		let document = Codec::default().to_document(&value).unwrap();
		let root = document.root();
		assert_eq!(root.tag(), "document");
		assert_eq!(children_tags(root), ["dict", "element", "element", "element", "dict", "element"]);
		let adjectives = root.children()[0].child("adjectives").unwrap();
		let texts: Vec<_> = adjectives.children().iter().filter_map(Node::text).collect();
		assert_eq!(texts, ["hernekeitto", "viina", "teline", "johannes"]);
	}

	#[test]
	fn record_value_identity() {
		let record = Value::Record(Record::new("Thing").field("a", 1));
		let document = Codec::default().encode_document(&record).unwrap();
		assert_eq!(document.root().tag(), "thing");
	}

	#[test]
	fn codec_is_shareable() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<Codec>();
	}
}
