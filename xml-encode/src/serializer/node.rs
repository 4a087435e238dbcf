use crate::{
	node::{
		Document,
		Node,
	},
	serializer::{
		Element,
		Serializer,
	},
	Result,
};

impl Element for Node {
	fn tag(&self) -> &str {
		Node::tag(self)
	}

	fn serialize<S: Serializer>(&self, mut serializer: S) -> Result<()> {
		for (key, value) in self.attributes() {
			serializer.serialize_attribute(key, value)?;
		}
		if let Some(text) = self.text() {
			serializer.serialize_text(text)?;
		}
		for child in self.children() {
			serializer.serialize_element(child)?;
		}
		Ok(())
	}
}

impl Element for Document {
	fn tag(&self) -> &str {
		self.root().tag()
	}

	fn serialize<S: Serializer>(&self, serializer: S) -> Result<()> {
		Element::serialize(self.root(), serializer)
	}
}
