use crate::value::{
	ToValue,
	Value,
};
use std::{
	any::TypeId,
	borrow::Cow,
};

/// Structured value with named fields
///
/// Usually built by `#[derive(ToValue)]`, but can be assembled by hand as well.
#[derive(Clone, Debug)]
pub struct Record {
	type_name: Cow<'static, str>,
	type_id: Option<TypeId>,
	tag: Option<Cow<'static, str>>,
	fields: Vec<(Cow<'static, str>, Value)>,
	attributes: Vec<Cow<'static, str>>,
}

impl Record {
	/// Empty record of the given type name
	pub fn new<N: Into<Cow<'static, str>>>(type_name: N) -> Self {
		Self {
			type_name: type_name.into(),
			type_id: None,
			tag: None,
			fields: Vec::new(),
			attributes: Vec::new(),
		}
	}

	/// Empty record for a rust type; takes name and identity from `T`
	pub fn of<T: 'static>() -> Self {
		let full = std::any::type_name::<T>();
		let name = full.split('<').next().unwrap_or(full);
		let name = name.rsplit("::").next().unwrap_or(name);
		let mut record = Self::new(name);
		record.type_id = Some(TypeId::of::<T>());
		record
	}

	/// Set type identity (for type-keyed strategies and attribute registrations)
	pub fn with_type_id(mut self, type_id: TypeId) -> Self {
		self.type_id = Some(type_id);
		self
	}

	/// Set explicit tag; otherwise the lower-cased type name is used
	pub fn with_tag<T: Into<Cow<'static, str>>>(mut self, tag: T) -> Self {
		self.tag = Some(tag.into());
		self
	}

	/// Append a field
	pub fn push_field<K: Into<Cow<'static, str>>>(&mut self, key: K, value: Value) {
		self.fields.push((key.into(), value));
	}

	/// Builder variant of `push_field`
	pub fn field<K: Into<Cow<'static, str>>, V: ToValue>(mut self, key: K, value: V) -> Self {
		self.push_field(key, value.to_value());
		self
	}

	/// Mark a field to be rendered as attribute of the record element
	pub fn promote<K: Into<Cow<'static, str>>>(&mut self, key: K) {
		let key = key.into();
		if !self.attributes.contains(&key) {
			self.attributes.push(key);
		}
	}

	/// Builder variant of `promote`
	pub fn attribute<K: Into<Cow<'static, str>>>(mut self, key: K) -> Self {
		self.promote(key);
		self
	}

	/// Type name
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Type identity, if known
	pub fn type_id(&self) -> Option<TypeId> {
		self.type_id
	}

	/// Explicit tag
	pub fn tag(&self) -> Option<&str> {
		self.tag.as_deref()
	}

	/// Fields in declaration order
	pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|(k, v)| (k.as_ref(), v))
	}

	/// Whether the field was marked for attribute promotion
	pub fn is_attribute(&self, key: &str) -> bool {
		self.attributes.iter().any(|a| a == key)
	}
}

impl From<Record> for Value {
	fn from(record: Record) -> Self {
		Value::Record(record)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	struct Coordinate;

	#[test]
	fn of_type() {
		let record = Record::of::<Coordinate>();
		assert_eq!(record.type_name(), "Coordinate");
		assert_eq!(record.type_id(), Some(TypeId::of::<Coordinate>()));
		assert_eq!(Record::of::<Vec<u8>>().type_name(), "Vec");
	}

	#[test]
	fn fields_and_attributes() {
		let record = Record::new("Coordinate")
			.field("x", 15)
			.field("color", "purple")
			.attribute("x")
			.attribute("x");
		let keys: Vec<_> = record.fields().map(|(k, _)| k).collect();
		assert_eq!(keys, ["x", "color"]);
		assert!(record.is_attribute("x"));
		assert!(!record.is_attribute("color"));
		assert_eq!(record.tag(), None);
	}
}
