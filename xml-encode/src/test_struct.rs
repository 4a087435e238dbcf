use crate::value::{
	Mapping,
	ToValue,
	Value,
};
use std::fmt;

#[derive(crate::ToValue)]
#[derive(Clone, PartialEq, Debug)]
#[xml_encode(crate = "crate")]
pub struct Address {
	pub city: String,
	pub state: String,
}

impl Address {
	pub fn turku() -> Self {
		Self {
			city: "turku".into(),
			state: "ulkomaat".into(),
		}
	}

	pub fn espoo() -> Self {
		Self {
			city: "espoo".into(),
			state: "uusimaa".into(),
		}
	}
}

#[derive(crate::ToValue)]
#[derive(Clone, Debug)]
#[xml_encode(crate = "crate")]
pub struct Person {
	pub id: u32,
	pub first_name: String,
	pub last_name: String,
	pub main_address: Option<Address>,
	pub addresses: Vec<Address>,
	pub cool: bool,
	pub age: u32,
	pub extra: Mapping,
	#[xml_encode(skip)]
	pub password: String,
}

impl Person {
	pub fn posankka() -> Self {
		Self {
			id: 811,
			first_name: "pos".into(),
			last_name: "ankka".into(),
			main_address: Some(Address::turku()),
			addresses: vec![Address::turku(), Address::espoo()],
			cool: true,
			age: 332,
			extra: Mapping::new().entry("hello", "world"),
			password: "hunter2".into(),
		}
	}
}

#[derive(crate::ToValue)]
#[derive(Clone, PartialEq, Debug)]
#[xml_encode(crate = "crate")]
pub struct Coordinate {
	#[xml_encode(attr)]
	pub x: i32,
	#[xml_encode(attr)]
	pub y: i32,
	pub color: String,
}

#[derive(crate::ToValue)]
#[derive(Clone, Debug)]
#[xml_encode(crate = "crate")]
pub struct Wall {
	pub color: String,
	#[xml_encode(attr)]
	pub attr_dict: Mapping,
}

impl Wall {
	pub fn new(color: &str, ayy: &str) -> Self {
		Self {
			color: color.into(),
			attr_dict: Mapping::new().entry("ayy", ayy),
		}
	}
}

#[derive(crate::ToValue)]
#[derive(Clone, PartialEq, Debug)]
#[xml_encode(tag = "datum", crate = "crate")]
pub struct Data {
	#[xml_encode(attr)]
	pub key: String,
	#[xml_encode(attr, rename = "other-value")]
	pub other: u32,
	pub note: Option<String>,
}

#[derive(crate::ToValue)]
#[derive(Clone, PartialEq, Debug)]
#[xml_encode(crate = "crate")]
pub struct Marker;

/// Generic structs don't record their type identity
#[derive(crate::ToValue)]
#[derive(Clone, PartialEq, Debug)]
#[xml_encode(crate = "crate")]
pub struct Labeled<T> {
	pub label: String,
	pub value: T,
}

/// Only known to strategies registered on a codec
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Date(pub u16, pub u8, pub u8);

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}-{:02}-{:02}", self.0, self.1, self.2)
	}
}

impl ToValue for Date {
	fn to_value(&self) -> Value {
		Value::opaque(*self)
	}
}
