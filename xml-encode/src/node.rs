//! Element tree produced by encoding

use indexmap::IndexMap;

/// An attribute request: to be merged into the attributes of the parent element
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Attribute {
	/// Attribute key
	pub key: String,
	/// Attribute value (unescaped)
	pub value: String,
}

impl Attribute {
	/// New attribute request
	pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
		Self { key: key.into(), value: value.into() }
	}
}

/// XML element
///
/// Attribute keys are unique; setting an existing key replaces the value but keeps the original
/// position.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
	tag: String,
	attributes: IndexMap<String, String>,
	children: Vec<Node>,
	text: Option<String>,
}

impl Node {
	/// New element without attributes, children or text
	pub fn new<T: Into<String>>(tag: T) -> Self {
		Self {
			tag: tag.into(),
			attributes: IndexMap::new(),
			children: Vec::new(),
			text: None,
		}
	}

	/// New leaf element wrapping a text
	pub fn with_text<T: Into<String>, X: Into<String>>(tag: T, text: X) -> Self {
		let mut node = Self::new(tag);
		node.text = Some(text.into());
		node
	}

	/// Tag name
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Attributes in insertion order
	pub fn attributes(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
		self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Lookup attribute value by key
	pub fn attribute(&self, key: &str) -> Option<&str> {
		self.attributes.get(key).map(String::as_str)
	}

	/// Child elements in order
	pub fn children(&self) -> &[Node] {
		&self.children
	}

	/// Text content (only set for leaf elements)
	pub fn text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	/// First child with the given tag
	pub fn child(&self, tag: &str) -> Option<&Node> {
		self.children.iter().find(|c| c.tag == tag)
	}

	/// Set an attribute; last write wins
	pub fn set_attribute<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
		self.attributes.insert(key.into(), value.into());
	}

	/// Append a child element
	pub fn push_child(&mut self, child: Node) {
		self.children.push(child);
	}

	/// Set text content
	pub fn set_text<X: Into<String>>(&mut self, text: X) {
		self.text = Some(text.into());
	}

	/// Copy of this node without children (attributes and text are kept)
	pub(crate) fn shallow_clone(&self) -> Self {
		Self {
			tag: self.tag.clone(),
			attributes: self.attributes.clone(),
			children: Vec::new(),
			text: self.text.clone(),
		}
	}
}

impl Extend<Node> for Node {
	fn extend<I: IntoIterator<Item = Node>>(&mut self, iter: I) {
		self.children.extend(iter);
	}
}

/// Outcome of encoding a single value
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Encoded {
	/// Elements to append to the parent; empty means the value was skipped
	Nodes(Vec<Node>),
	/// Attributes to merge into the parent element
	Attributes(Vec<Attribute>),
}

impl Encoded {
	/// Nothing gets added to the parent
	pub fn skip() -> Self {
		Self::Nodes(Vec::new())
	}

	/// A single element
	pub fn node(node: Node) -> Self {
		Self::Nodes(vec![node])
	}

	/// A single attribute request
	pub fn attribute<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
		Self::Attributes(vec![Attribute::new(key, value)])
	}

	/// Whether the value contributes nothing
	pub fn is_skip(&self) -> bool {
		match self {
			Self::Nodes(nodes) => nodes.is_empty(),
			Self::Attributes(attrs) => attrs.is_empty(),
		}
	}
}

/// Resolved root of a container
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Root {
	/// Container items become children of this element
	Element(Node),
	/// Container items are returned as a flat list of siblings without a wrapping element
	Bare,
	/// The container contributes nothing
	Skip,
}

/// Final encoded document: a single root element
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Document {
	root: Node,
}

impl Document {
	/// Document with the given root element
	pub fn new(root: Node) -> Self {
		Self { root }
	}

	/// Root element
	pub fn root(&self) -> &Node {
		&self.root
	}

	/// Take the root element
	pub fn into_root(self) -> Node {
		self.root
	}
}
