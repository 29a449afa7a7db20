use cms_schema::schema::PrimitiveKind;
use cms_schema::{Schema, Shape};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use serde_json::Value;

use crate::generator::Registry;
use crate::type_utils::{rust_type, safe_field_ident};

/// Generate a struct for an object shape, and every nested type it needs.
/// Fields keep the shape's declared order.
pub fn generate_struct(
    struct_name: &str,
    shape: &Shape,
    doc: Option<&str>,
    registry: &mut Registry,
) {
    if !registry.reserve(struct_name) {
        return;
    }
    let struct_ident = format_ident!("{}", struct_name);

    let field_tokens: Vec<TokenStream> = shape
        .iter()
        .map(|(field_name, field_schema)| {
            let ident = safe_field_ident(field_name);
            let ty = rust_type(field_schema, struct_name, field_name, registry);
            generate_field_with_attrs(&ident, &ty, field_schema, field_name)
        })
        .collect();

    let doc_attr = doc.map(|doc| quote! { #[doc = #doc] });

    registry.push(quote! {
        #doc_attr
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct #struct_ident {
            #(#field_tokens)*
        }
    });
}

/// Generate a struct field with appropriate serde attributes.
fn generate_field_with_attrs(
    ident: &proc_macro2::Ident,
    ty: &TokenStream,
    field_schema: &Schema,
    field_name: &str,
) -> TokenStream {
    let rename_attr = if ident.to_string().trim_start_matches("r#") != field_name {
        Some(quote! { #[serde(rename = #field_name)] })
    } else {
        None
    };
    let serde_attrs = generate_serde_attrs(field_schema);

    quote! {
        #rename_attr
        #serde_attrs
        pub #ident: #ty,
    }
}

/// Generate serde attributes for a field.
fn generate_serde_attrs(field_schema: &Schema) -> TokenStream {
    match field_schema {
        Schema::Optional(_) => {
            quote! { #[serde(default, skip_serializing_if = "Option::is_none")] }
        }
        Schema::WithDefault { inner, default } if default_matches_rust_default(inner, default) => {
            quote! { #[serde(default)] }
        }
        _ => quote! {},
    }
}

/// Whether `Default::default()` of the generated type equals the schema default,
/// so `#[serde(default)]` is faithful.
fn default_matches_rust_default(inner: &Schema, default: &Value) -> bool {
    match inner {
        Schema::ArrayOf { .. } => default.as_array().map_or(false, Vec::is_empty),
        // generated enums implement Default with the schema's default literal
        Schema::EnumOf(values) => default
            .as_str()
            .map_or(false, |d| values.iter().any(|v| v == d)),
        Schema::Primitive(p) => match p.kind {
            PrimitiveKind::Boolean => default == &Value::Bool(false),
            PrimitiveKind::Number => default.as_f64() == Some(0.0),
            PrimitiveKind::Date => false,
            _ => default.as_str() == Some(""),
        },
        Schema::Refined { inner, .. } => default_matches_rust_default(inner, default),
        _ => false,
    }
}
