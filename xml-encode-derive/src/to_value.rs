use proc_macro2::TokenStream;
use quote::{quote, quote_spanned, ToTokens, TokenStreamExt};
use syn::{parse_quote, Path};

use crate::element::{Field, RecordInput};

struct RecordField<'a> {
	data: &'a Field,
	xml_encode_crate: &'a Path,
}

impl<'a> RecordField<'a> {
	fn new(data: &'a Field, xml_encode_crate: &'a Path) -> Self {
		Self {
			data,
			xml_encode_crate,
		}
	}
}

impl ToTokens for RecordField<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		let Self {
			data,
			xml_encode_crate,
		} = self;

		let ident = &data.ident;
		let key = &data.key;

		tokens.append_all(quote_spanned! {data.span()=>
			record.push_field(#key, #xml_encode_crate::value::ToValue::to_value(&self.#ident));
		});

		if data.attr {
			tokens.append_all(quote_spanned! {data.span()=>
				record.promote(#key);
			});
		}
	}
}

pub fn derive_to_value(input: &RecordInput) -> TokenStream {
	let xml_encode_crate = &input.xml_encode_crate;
	let fields = input
		.fields()
		.map(|field| RecordField::new(field, xml_encode_crate))
		.collect::<Vec<_>>();

	let mut generics = input.generics.clone();
	for param in generics.type_params_mut() {
		param
			.bounds
			.push(parse_quote!(#xml_encode_crate::value::ToValue));
	}
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	let ident = &input.ident;
	let type_name = input.type_name();

	let type_id = if input.has_type_id() {
		quote!(.with_type_id(::core::any::TypeId::of::<Self>()))
	} else {
		quote!()
	};

	let tag = match input.tag() {
		Some(tag) => quote!(.with_tag(#tag)),
		None => quote!(),
	};

	let mutability = if fields.is_empty() {
		quote!()
	} else {
		quote!(mut)
	};

	quote! {
		impl #impl_generics #xml_encode_crate::value::ToValue for #ident #ty_generics #where_clause {
			fn to_value(&self) -> #xml_encode_crate::value::Value {
				let #mutability record = #xml_encode_crate::value::Record::new(#type_name) #type_id #tag;
				#(#fields)*
				#xml_encode_crate::value::Value::Record(record)
			}
		}
	}
}
