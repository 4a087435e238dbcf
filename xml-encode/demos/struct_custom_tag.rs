// use `cargo run -p xml-encode --example struct_custom_tag` to run from git repository base directory

use xml_encode::{
	context::FrameKind,
	quick_xml::{
		serialize_document_pretty,
		to_xml_string,
	},
	value::Mapping,
	Codec,
	ToValue,
};

/// a struct that customizes the tag name in XML output
#[derive(ToValue)]
#[xml_encode(tag = "datum")]
pub struct Data {
	#[xml_encode(attr)]
	pub key: String,
	#[xml_encode(attr, rename = "other-value")]
	pub other: u32,
	pub tags: Vec<String>,
	pub extra: Mapping,
}

fn main() {
	let stuff = Data {
		key: "hello".into(),
		other: 5,
		tags: vec!["a".into(), "b".into()],
		extra: Mapping::new().entry("answer", 42),
	};

	eprintln!("Generating XML output...");

	// print compact fragment
	println!("{}", to_xml_string(&stuff).unwrap());

	// print indented document; sequence items get an explicit tag
	let codec = Codec::default().primitive_item_tag_with(|codec, value, context| {
		match context.current_kind() {
			Some(FrameKind::SequenceItem) => Ok("tag".into()),
			_ => codec.default_primitive_item_tag(value, context),
		}
	});
	let document = codec.to_document(&stuff).unwrap();
	println!("{}", serialize_document_pretty(&document, 2).unwrap());
}
