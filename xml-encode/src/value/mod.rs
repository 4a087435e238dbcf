//! Dynamic value tree that gets encoded
//!
//! Rust values are first lowered into a `Value` (see `ToValue`, which can be derived for structs);
//! the codec then only needs to look at the shape of the `Value`.

mod impls;
mod mapping;
mod record;

use std::{
	any::{
		Any,
		TypeId,
	},
	fmt,
	sync::Arc,
};

pub use self::{
	impls::ToValue,
	mapping::Mapping,
	record::Record,
};

/// Value to encode
#[derive(Clone, Debug)]
pub enum Value {
	/// Absent value; skipped wherever it appears
	None,
	/// Boolean primitive
	Bool(bool),
	/// Signed integer primitive
	Int(i64),
	/// Unsigned integer primitive
	UInt(u64),
	/// Floating point primitive
	Float(f64),
	/// Text primitive
	Str(String),
	/// Ordered sequence
	Sequence(Vec<Value>),
	/// Insertion-ordered key-value mapping
	Mapping(Mapping),
	/// Structured record with named fields
	Record(Record),
	/// Value only a registered strategy knows how to encode
	Opaque(Opaque),
}

impl Value {
	/// Wrap a value for a registered strategy (see `Codec::register`)
	pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
		Self::Opaque(Opaque::new(value))
	}

	/// Type descriptor; used in error messages
	pub fn type_name(&self) -> &str {
		match self {
			Self::None => "none",
			Self::Bool(_) => "bool",
			Self::Int(_) | Self::UInt(_) => "int",
			Self::Float(_) => "float",
			Self::Str(_) => "str",
			Self::Sequence(_) => "sequence",
			Self::Mapping(_) => "mapping",
			Self::Record(r) => r.type_name(),
			Self::Opaque(o) => o.type_name(),
		}
	}

	/// Concrete type identity for type-keyed strategies
	///
	/// Only opaque values and records that know their type have one.
	pub fn type_id(&self) -> Option<TypeId> {
		match self {
			Self::Record(r) => r.type_id(),
			Self::Opaque(o) => Some(o.type_id()),
			_ => None,
		}
	}

	/// Whether this is a number, text or boolean
	pub fn is_primitive(&self) -> bool {
		matches!(
			self,
			Self::Bool(_) | Self::Int(_) | Self::UInt(_) | Self::Float(_) | Self::Str(_)
		)
	}

	/// Whether this is a number or boolean
	pub fn is_numeric_or_bool(&self) -> bool {
		matches!(self, Self::Bool(_) | Self::Int(_) | Self::UInt(_) | Self::Float(_))
	}

	/// Textual form of a primitive
	///
	/// Floats with an integral value keep a fractional digit (`15.0`), so they stay
	/// distinguishable from integers.
	pub fn as_text(&self) -> Option<String> {
		match self {
			Self::Bool(v) => Some(v.to_string()),
			Self::Int(v) => Some(v.to_string()),
			Self::UInt(v) => Some(v.to_string()),
			Self::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(format!("{:.1}", v)),
			Self::Float(v) => Some(v.to_string()),
			Self::Str(v) => Some(v.clone()),
			_ => None,
		}
	}

	/// Typed access to opaque values
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Self::Opaque(o) => o.downcast_ref(),
			_ => None,
		}
	}

	/// Whether this is `Value::None`
	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}
}

impl Default for Value {
	fn default() -> Self {
		Self::None
	}
}

/// Shared payload of a type the built-in strategies don't understand
#[derive(Clone)]
pub struct Opaque {
	type_id: TypeId,
	type_name: &'static str,
	inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
	/// Wrap value
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			type_name: std::any::type_name::<T>(),
			inner: Arc::new(value),
		}
	}

	/// Identity of the wrapped type
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Name of the wrapped type
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Typed access
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.inner.downcast_ref()
	}
}

impl fmt::Debug for Opaque {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Opaque").field(&self.type_name).finish()
	}
}
