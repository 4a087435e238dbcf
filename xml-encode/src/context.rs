//! Ancestry of the value currently being encoded

use crate::{
	node::Node,
	value::Value,
};
use std::{
	fmt,
	rc::Rc,
};

/// What kind of container (or container item) a frame describes
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FrameKind {
	/// A sequence container
	Sequence,
	/// An element of a sequence; keyed by its index
	SequenceItem,
	/// A mapping container
	Mapping,
	/// An entry of a mapping; keyed by the entry key
	MappingItem,
	/// A structured record
	Record,
	/// A field of a record; keyed by the field name
	RecordFieldItem,
}

impl FrameKind {
	/// Whether frames of this kind describe a container item (and therefore carry a key)
	pub fn is_item(self) -> bool {
		matches!(self, Self::SequenceItem | Self::MappingItem | Self::RecordFieldItem)
	}

	/// Whether frames of this kind describe an item with a name (mapping entries and record
	/// fields)
	pub fn is_keyed_item(self) -> bool {
		matches!(self, Self::MappingItem | Self::RecordFieldItem)
	}
}

impl fmt::Display for FrameKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Sequence => "sequence",
			Self::SequenceItem => "sequence item",
			Self::Mapping => "mapping",
			Self::MappingItem => "mapping item",
			Self::Record => "record",
			Self::RecordFieldItem => "record field",
		})
	}
}

/// Key of an item frame
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Key<'v> {
	/// Position within a sequence
	Index(usize),
	/// Mapping entry key or record field name
	Name(&'v str),
}

impl<'v> Key<'v> {
	/// The name for mapping entries and record fields
	pub fn as_name(&self) -> Option<&'v str> {
		match *self {
			Self::Index(_) => None,
			Self::Name(name) => Some(name),
		}
	}
}

impl fmt::Display for Key<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Index(index) => fmt::Display::fmt(index, f),
			Self::Name(name) => f.write_str(name),
		}
	}
}

/// One level of ancestry
#[derive(Clone, Debug)]
pub struct Frame<'v> {
	kind: FrameKind,
	value: &'v Value,
	node: Option<Rc<Node>>,
	key: Option<Key<'v>>,
}

impl<'v> Frame<'v> {
	/// Kind of container or item
	pub fn kind(&self) -> FrameKind {
		self.kind
	}

	/// The raw value at this level
	pub fn value(&self) -> &'v Value {
		self.value
	}

	/// The element produced for the container, once it is known
	///
	/// This is a snapshot taken right after root resolution: it has the resolved tag and initial
	/// attributes, but none of the children.  Bare sequences never have a node.
	pub fn node(&self) -> Option<&Node> {
		self.node.as_deref()
	}

	/// Key for item frames; always `None` for container frames
	pub fn key(&self) -> Option<Key<'v>> {
		self.key
	}
}

struct Link<'v> {
	frame: Frame<'v>,
	parent: Option<Rc<Link<'v>>>,
	depth: usize,
}

/// Immutable ancestry of the value currently being encoded
///
/// Descending with `child` never modifies the receiver; the new context shares all frames of its
/// prefix with the receiver, so sibling encodings never see each other.
#[derive(Clone, Default)]
pub struct Context<'v> {
	head: Option<Rc<Link<'v>>>,
}

impl<'v> Context<'v> {
	/// Empty context (document level)
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a new context with one more frame at the end
	///
	/// `key` must be given exactly for item kinds (see `FrameKind::is_item`).
	pub fn child(
		&self,
		kind: FrameKind,
		value: &'v Value,
		key: Option<Key<'v>>,
		node: Option<Rc<Node>>,
	) -> Self {
		debug_assert_eq!(
			kind.is_item(),
			key.is_some(),
			"item frames (and only those) need a key"
		);
		Self {
			head: Some(Rc::new(Link {
				frame: Frame { kind, value, node, key },
				parent: self.head.clone(),
				depth: self.depth() + 1,
			})),
		}
	}

	/// Number of frames
	pub fn depth(&self) -> usize {
		self.head.as_ref().map_or(0, |link| link.depth)
	}

	/// Whether this is the document level context
	pub fn is_empty(&self) -> bool {
		self.head.is_none()
	}

	/// Last frame
	pub fn current_frame(&self) -> Option<&Frame<'v>> {
		self.head.as_ref().map(|link| &link.frame)
	}

	/// Second-to-last frame
	pub fn parent_frame(&self) -> Option<&Frame<'v>> {
		let parent = self.head.as_ref()?.parent.as_ref()?;
		Some(&parent.frame)
	}

	/// Kind of the last frame
	pub fn current_kind(&self) -> Option<FrameKind> {
		self.current_frame().map(Frame::kind)
	}

	/// Key of the last frame (if it is an item frame)
	pub fn current_key(&self) -> Option<Key<'v>> {
		self.current_frame().and_then(Frame::key)
	}

	/// Value of the last frame
	pub fn current_value(&self) -> Option<&'v Value> {
		self.current_frame().map(Frame::value)
	}

	/// Iterate frames from the current one up to the document level
	pub fn frames(&self) -> Frames<'_, 'v> {
		Frames { next: self.head.as_deref() }
	}
}

impl fmt::Debug for Context<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut frames: Vec<_> = self.frames().collect();
		frames.reverse();
		f.debug_list().entries(frames).finish()
	}
}

/// Iterator over the frames of a context, innermost first
pub struct Frames<'c, 'v> {
	next: Option<&'c Link<'v>>,
}

impl<'c, 'v> Iterator for Frames<'c, 'v> {
	type Item = &'c Frame<'v>;

	fn next(&mut self) -> Option<Self::Item> {
		let link = self.next?;
		self.next = link.parent.as_deref();
		Some(&link.frame)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn projections() {
		let list = Value::Sequence(vec![Value::Int(1)]);
		let item = Value::Int(1);

		let root = Context::new();
		assert!(root.is_empty());
		assert!(root.current_frame().is_none());
		assert!(root.parent_frame().is_none());

		let ctx = root.child(FrameKind::Sequence, &list, None, None);
		assert_eq!(ctx.depth(), 1);
		assert_eq!(ctx.current_kind(), Some(FrameKind::Sequence));
		assert_eq!(ctx.current_key(), None);
		assert!(ctx.parent_frame().is_none());

		let ctx = ctx.child(FrameKind::SequenceItem, &item, Some(Key::Index(0)), None);
		assert_eq!(ctx.depth(), 2);
		assert_eq!(ctx.current_key(), Some(Key::Index(0)));
		assert_eq!(ctx.parent_frame().map(Frame::kind), Some(FrameKind::Sequence));
		assert!(std::ptr::eq(ctx.current_value().unwrap(), &item));
	}

	#[test]
	fn child_leaves_receiver_untouched() {
		let map = Value::Mapping(Default::default());
		let a = Value::Int(1);
		let b = Value::Int(2);

		let parent = Context::new().child(FrameKind::Mapping, &map, None, None);
		let first = parent.child(FrameKind::MappingItem, &a, Some(Key::Name("a")), None);
		let second = parent.child(FrameKind::MappingItem, &b, Some(Key::Name("b")), None);

		assert_eq!(parent.depth(), 1);
		assert_eq!(parent.current_kind(), Some(FrameKind::Mapping));
		assert_eq!(first.current_key(), Some(Key::Name("a")));
		assert_eq!(second.current_key(), Some(Key::Name("b")));
		let kinds: Vec<_> = second.frames().map(Frame::kind).collect();
		assert_eq!(kinds, [FrameKind::MappingItem, FrameKind::Mapping]);
	}

	#[test]
	fn key_display() {
		assert_eq!(Key::Index(3).to_string(), "3");
		assert_eq!(Key::Name("city").to_string(), "city");
		assert_eq!(Key::Name("city").as_name(), Some("city"));
		assert_eq!(Key::Index(3).as_name(), None);
	}
}
