use crate::value::{
	Mapping,
	Value,
};
use std::{
	borrow::Cow,
	collections::{
		BTreeMap,
		BTreeSet,
		VecDeque,
	},
	fmt,
	rc::Rc,
	sync::Arc,
};

/// Lower a rust value into a `Value` tree
///
/// Can be derived for structs (if `derive` feature is active); the derived implementation builds
/// a `Record`.
pub trait ToValue {
	/// Build the value tree
	fn to_value(&self) -> Value;
}

impl ToValue for Value {
	fn to_value(&self) -> Value {
		self.clone()
	}
}

impl ToValue for Mapping {
	fn to_value(&self) -> Value {
		Value::Mapping(self.clone())
	}
}

impl ToValue for crate::value::Record {
	fn to_value(&self) -> Value {
		Value::Record(self.clone())
	}
}

impl ToValue for bool {
	fn to_value(&self) -> Value {
		Value::Bool(*self)
	}
}

macro_rules! impl_number {
	($variant:ident as $repr:ty: $($t:ty),*) => {$(
		impl ToValue for $t {
			fn to_value(&self) -> Value {
				Value::$variant(*self as $repr)
			}
		}
	)*};
}

impl_number!(Int as i64: i8, i16, i32, i64, isize);
impl_number!(UInt as u64: u8, u16, u32, u64, usize);
impl_number!(Float as f64: f32, f64);

impl ToValue for char {
	fn to_value(&self) -> Value {
		Value::Str(self.to_string())
	}
}

impl ToValue for str {
	fn to_value(&self) -> Value {
		Value::Str(self.to_owned())
	}
}

impl ToValue for String {
	fn to_value(&self) -> Value {
		Value::Str(self.clone())
	}
}

impl ToValue for Cow<'_, str> {
	fn to_value(&self) -> Value {
		Value::Str(self.as_ref().to_owned())
	}
}

/// `None` is skipped wherever it appears
impl<T: ToValue> ToValue for Option<T> {
	fn to_value(&self) -> Value {
		match self {
			Some(v) => v.to_value(),
			None => Value::None,
		}
	}
}

impl<T: ToValue + ?Sized> ToValue for &T {
	fn to_value(&self) -> Value {
		(**self).to_value()
	}
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
	fn to_value(&self) -> Value {
		(**self).to_value()
	}
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
	fn to_value(&self) -> Value {
		(**self).to_value()
	}
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
	fn to_value(&self) -> Value {
		(**self).to_value()
	}
}

impl<T: ToValue> ToValue for [T] {
	fn to_value(&self) -> Value {
		Value::Sequence(self.iter().map(ToValue::to_value).collect())
	}
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
	fn to_value(&self) -> Value {
		self[..].to_value()
	}
}

impl<T: ToValue> ToValue for Vec<T> {
	fn to_value(&self) -> Value {
		self[..].to_value()
	}
}

impl<T: ToValue> ToValue for VecDeque<T> {
	fn to_value(&self) -> Value {
		Value::Sequence(self.iter().map(ToValue::to_value).collect())
	}
}

/// Sets encode like sequences, in iteration order
impl<T: ToValue> ToValue for BTreeSet<T> {
	fn to_value(&self) -> Value {
		Value::Sequence(self.iter().map(ToValue::to_value).collect())
	}
}

/// Keys are converted to text with `Display`
impl<K: fmt::Display, V: ToValue> ToValue for BTreeMap<K, V> {
	fn to_value(&self) -> Value {
		Value::Mapping(self.iter().map(|(k, v)| (k.to_string(), v)).collect())
	}
}

macro_rules! impl_tuple {
	($($name:ident)+) => {
		/// Tuples encode like sequences
		impl<$($name: ToValue),+> ToValue for ($($name,)+) {
			#[allow(non_snake_case)]
			fn to_value(&self) -> Value {
				let ($($name,)+) = self;
				Value::Sequence(vec![$($name.to_value()),+])
			}
		}
	};
}

impl_tuple!(A);
impl_tuple!(A B);
impl_tuple!(A B C);
impl_tuple!(A B C D);
