use darling::{ast, FromDeriveInput, FromField};
use proc_macro2::Span;
use syn::{ext::IdentExt, parse_quote, spanned::Spanned, Generics, Ident, Path};

/// Parsed representation of a struct field.
pub struct Field {
	pub ident: Ident,
	/// Key of the field; used as tag of leaf elements or as attribute key.
	pub key: String,
	/// Render as attribute of the record element.
	pub attr: bool,
	pub skip: bool,
	span: Span,
}

impl Field {
	pub fn span(&self) -> Span {
		self.span
	}
}

impl FromField for Field {
	fn from_field(field: &syn::Field) -> darling::Result<Self> {
		#[derive(FromField)]
		#[darling(attributes(xml_encode))]
		struct RawField {
			ident: Option<Ident>,
			#[darling(default)]
			attr: bool,
			#[darling(default)]
			rename: Option<String>,
			#[darling(default)]
			skip: bool,
		}

		let RawField {
			ident,
			attr,
			rename,
			skip,
		} = RawField::from_field(field)?;

		let ident = match ident {
			Some(ident) => ident,
			None => {
				return Err(darling::Error::custom("Only named fields supported").with_span(field))
			}
		};

		if attr && skip {
			return Err(darling::Error::custom("`attr` and `skip` can't be combined").with_span(field));
		}

		Ok(Self {
			key: rename.unwrap_or_else(|| ident.unraw().to_string()),
			ident,
			attr,
			skip,
			span: field.span(),
		})
	}
}

fn default_crate_path() -> Path {
	parse_quote!(xml_encode)
}

#[derive(FromDeriveInput)]
#[darling(attributes(xml_encode), supports(struct_named, struct_unit))]
pub struct RecordInput {
	pub ident: Ident,
	pub generics: Generics,
	pub data: ast::Data<(), Field>,
	/// If set, the XML tag name to use instead of the lower-cased struct ident.
	#[darling(default)]
	tag: Option<String>,
	#[darling(rename = "crate", default = "default_crate_path")]
	pub xml_encode_crate: Path,
}

impl RecordInput {
	/// The type name recorded in the value; the struct ident.
	pub fn type_name(&self) -> String {
		self.ident.unraw().to_string()
	}

	/// Explicit XML tag, if one was given.
	pub fn tag(&self) -> Option<&str> {
		self.tag.as_deref()
	}

	/// Whether the type identity can be recorded (requires `'static`, so no generics at all).
	pub fn has_type_id(&self) -> bool {
		self.generics.params.is_empty()
	}

	/// The fields of the input struct that get encoded.
	pub fn fields<'a>(&'a self) -> impl Iterator<Item = &'a Field> {
		self.data
			.as_ref()
			.take_struct()
			.expect("supports() only allows structs")
			.into_iter()
			.filter(|field| !field.skip)
	}
}
