use crate::{
	node::Document,
	serializer::{
		self,
		Element,
	},
	value::ToValue,
	Codec,
	Result,
};
use quick_xml::events::{
	BytesDecl,
	BytesEnd,
	BytesStart,
	BytesText,
	Event,
};
use std::io;

fn render<F>(mut writer: quick_xml::Writer<Vec<u8>>, write: F) -> Result<String>
where
	F: FnOnce(&mut Serializer<'_, Vec<u8>>) -> Result<()>,
{
	write(&mut Serializer::new(&mut writer))?;
	Ok(String::from_utf8(writer.into_inner())?)
}

/// Serialize document including XML declaration in memory
pub fn serialize_document(document: &Document) -> Result<String> {
	render(quick_xml::Writer::new(Vec::new()), |ser| {
		ser.serialize_document(document)
	})
}

/// Serialize document including XML declaration, indenting nested elements by `indent` spaces
pub fn serialize_document_pretty(document: &Document, indent: usize) -> Result<String> {
	render(
		quick_xml::Writer::new_with_indent(Vec::new(), b' ', indent),
		|ser| ser.serialize_document(document),
	)
}

/// Serialize a single element (no XML declaration) in memory
pub fn serialize_element<E: Element>(element: &E) -> Result<String> {
	render(quick_xml::Writer::new(Vec::new()), |ser| {
		ser.serialize_element(element)
	})
}

/// Encode a value with the default codec and render it as XML fragment
pub fn to_xml_string<T: ToValue + ?Sized>(value: &T) -> Result<String> {
	let document = Codec::default().to_document(value)?;
	serialize_element(&document)
}

/// Serializer adaptor for `quick_xml::Writer`
pub struct Serializer<'w, W: io::Write> {
	writer: &'w mut quick_xml::Writer<W>,
}

impl<'w, W: io::Write> Serializer<'w, W> {
	/// New adaptor using the writer
	pub fn new(writer: &'w mut quick_xml::Writer<W>) -> Self {
		Self { writer }
	}

	/// Serialize full document from root element
	pub fn serialize_document<E: Element>(&mut self, element: &E) -> Result<()> {
		self.writer
			.write_event(Event::Decl(BytesDecl::new(b"1.0", Some(b"utf-8"), None)))?;
		self.serialize_element(element)
	}

	/// Serialize single element
	pub fn serialize_element<E: Element>(&mut self, element: &E) -> Result<()> {
		let tag = element.tag().as_bytes().to_vec();
		let mut ser = SRef {
			serializer: self,
			end: Some(BytesEnd::owned(tag.clone())),
			start: Some(BytesStart::owned_name(tag)),
		};
		element.serialize(&mut ser)?;
		ser.close()
	}
}

/// Element being written; `start` is pending until content shows up
struct SRef<'a, 'w, W: io::Write> {
	serializer: &'a mut Serializer<'w, W>,
	start: Option<BytesStart<'static>>,
	end: Option<BytesEnd<'static>>,
}

impl<'a, 'w, W: io::Write> SRef<'a, 'w, W> {
	fn start(&mut self) -> Result<()> {
		if let Some(s) = self.start.take() {
			self.serializer.writer.write_event(Event::Start(s))?;
		}
		Ok(())
	}

	fn close(&mut self) -> Result<()> {
		if let Some(s) = self.start.take() {
			self.serializer.writer.write_event(Event::Empty(s))?;
			self.end = None;
		} else if let Some(e) = self.end.take() {
			self.serializer.writer.write_event(Event::End(e))?;
		}
		Ok(())
	}
}

impl<'a, 'w, W: io::Write> serializer::Serializer for &'_ mut SRef<'a, 'w, W> {
	fn serialize_attribute(&mut self, key: &str, value: &str) -> Result<()> {
		match self.start.as_mut() {
			// the tuple conversion escapes the value
			Some(start) => start.push_attribute((key, value)),
			None => return Err(crate::Error::custom(format!("attribute {:?} after element content", key))),
		}
		Ok(())
	}

	fn serialize_text(&mut self, text: &str) -> Result<()> {
		self.start()?;
		self.serializer
			.writer
			.write_event(Event::Text(BytesText::from_plain_str(text)))?;
		Ok(())
	}

	fn serialize_element<E: Element>(&mut self, element: &E) -> Result<()> {
		self.start()?;
		self.serializer.serialize_element(element)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		node::Node,
		test_struct::*,
		value::Mapping,
	};

	#[test]
	fn escaping() {
		let mut node = Node::with_text("k", "<a & \"b\">");
		node.set_attribute("q", "x<'y'>");
		assert_eq!(
			serialize_element(&node).unwrap(),
			r#"<k q="x&lt;&apos;y&apos;&gt;">&lt;a &amp; &quot;b&quot;&gt;</k>"#,
		);

		assert_eq!(
			to_xml_string(&Mapping::new().entry("k", "1 < 2")).unwrap(),
			"<dict><k>1 &lt; 2</k></dict>",
		);
	}

	#[test]
	fn empty_element() {
		assert_eq!(to_xml_string(&Marker).unwrap(), "<marker/>");
	}

	#[test]
	fn attributes() {
		let coordinate = Coordinate {
			x: 15,
			y: 33,
			color: "purple".into(),
		};
		assert_eq!(
			to_xml_string(&coordinate).unwrap(),
			r#"<coordinate x="15" y="33"><color>purple</color></coordinate>"#,
		);
		assert_eq!(
			to_xml_string(&Wall::new("red", "lmao")).unwrap(),
			r#"<wall ayy="lmao"><color>red</color></wall>"#,
		);
	}

	#[test]
	fn person() {
		let xml = to_xml_string(&Person::posankka()).unwrap();
		assert!(xml.starts_with("<person><id>811</id><first_name>pos</first_name>"));
		assert!(xml.contains("<address><city>turku</city><state>ulkomaat</state></address>"));
		assert!(xml.contains("<cool>true</cool><age>332</age>"));
		assert!(!xml.contains("hunter2"));
		assert!(xml.ends_with("</person>"));
	}

	#[test]
	fn document() {
		let document = Codec::default().to_document(&Wall::new("red", "lmao")).unwrap();
		assert_eq!(
			serialize_document(&document).unwrap(),
			r#"<?xml version="1.0" encoding="utf-8"?><wall ayy="lmao"><color>red</color></wall>"#,
		);
		assert_eq!(
			serialize_document_pretty(&document, 2).unwrap(),
			"<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<wall ayy=\"lmao\">\n  <color>red</color>\n</wall>",
		);
	}
}
