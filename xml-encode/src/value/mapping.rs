use crate::value::{
	ToValue,
	Value,
};
use indexmap::IndexMap;
use std::iter::FromIterator;

/// Insertion-ordered mapping with string keys
///
/// Inserting an existing key replaces the value but keeps its original position.
#[derive(Clone, Default, Debug)]
pub struct Mapping {
	entries: IndexMap<String, Value>,
}

impl Mapping {
	/// Empty mapping
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert (or replace) an entry
	pub fn insert<K: Into<String>, V: ToValue>(&mut self, key: K, value: V) {
		self.entries.insert(key.into(), value.to_value());
	}

	/// Builder variant of `insert`
	pub fn entry<K: Into<String>, V: ToValue>(mut self, key: K, value: V) -> Self {
		self.insert(key, value);
		self
	}

	/// Lookup value by key
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Entries in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Number of entries
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether there are no entries
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<K: Into<String>, V: ToValue> FromIterator<(K, V)> for Mapping {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().map(|(k, v)| (k.into(), v.to_value())).collect(),
		}
	}
}

impl From<Mapping> for Value {
	fn from(mapping: Mapping) -> Self {
		Value::Mapping(mapping)
	}
}
