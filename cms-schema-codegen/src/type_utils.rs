use cms_schema::schema::PrimitiveKind;
use cms_schema::Schema;
use heck::{ToPascalCase, ToSnakeCase};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::enum_gen::generate_value_enum;
use crate::generator::Registry;
use crate::struct_gen::generate_struct;

/// Convert an entity name to its PascalCase struct name.
/// e.g. "blog-post" -> "BlogPost", "csr-page" -> "CsrPage"
pub fn entity_struct_name(entity_name: &str) -> String {
    entity_name.to_pascal_case()
}

/// Name of a type nested under `owner` for `field`.
/// e.g. ("BlogPost", "author") -> "BlogPostAuthor"
pub fn nested_type_name(owner: &str, field: &str) -> String {
    format!("{}{}", owner, field.to_pascal_case())
}

/// Map a schema node to its Rust type, generating any struct or enum it needs.
/// `owner` and `field` name the generated types.
pub fn rust_type(
    schema: &Schema,
    owner: &str,
    field: &str,
    registry: &mut Registry,
) -> TokenStream {
    match schema {
        Schema::Primitive(p) => match p.kind {
            PrimitiveKind::Number if p.constraints.integer => quote! { i64 },
            PrimitiveKind::Number => quote! { f64 },
            PrimitiveKind::Boolean => quote! { bool },
            PrimitiveKind::Date => quote! { chrono::DateTime<chrono::Utc> },
            _ => quote! { String },
        },
        Schema::EnumOf(values) => {
            let name = nested_type_name(owner, field);
            generate_value_enum(&name, values, None, registry);
            let ident = format_ident!("{}", name);
            quote! { #ident }
        }
        Schema::ObjectOf(object) => {
            let name = nested_type_name(owner, field);
            generate_struct(&name, object.shape(), None, registry);
            let ident = format_ident!("{}", name);
            quote! { #ident }
        }
        Schema::ArrayOf { element, .. } => {
            let item_type = rust_type(element, owner, &singularize(field), registry);
            quote! { Vec<#item_type> }
        }
        Schema::Optional(inner) => {
            let inner_type = rust_type(inner, owner, field, registry);
            quote! { Option<#inner_type> }
        }
        Schema::WithDefault { inner, default } => match (&**inner, default.as_str()) {
            (Schema::EnumOf(values), Some(default_value)) => {
                let name = nested_type_name(owner, field);
                generate_value_enum(&name, values, Some(default_value), registry);
                let ident = format_ident!("{}", name);
                quote! { #ident }
            }
            _ => rust_type(inner, owner, field, registry),
        },
        Schema::Refined { inner, .. } => rust_type(inner, owner, field, registry),
    }
}

/// Naive singularization of English words, applied to camelCase field names.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}y")
    } else if word.ends_with("sses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Check if a field name is a Rust keyword and needs raw identifier syntax.
pub fn safe_field_ident(name: &str) -> proc_macro2::Ident {
    let snake = name.to_snake_case();
    match snake.as_str() {
        "type" | "struct" | "enum" | "fn" | "let" | "mut" | "ref" | "super" | "mod" | "use"
        | "pub" | "impl" | "trait" | "for" | "loop" | "while" | "if" | "else" | "match"
        | "return" | "break" | "continue" | "as" | "in" | "where" | "async" | "await"
        | "dyn" | "move" | "static" | "const" | "unsafe" | "extern" | "true" | "false"
        | "abstract" | "become" | "box" | "do" | "final" | "macro" | "override" | "priv"
        | "typeof" | "unsized" | "virtual" | "yield" | "try" => {
            format_ident!("r#{}", snake)
        }
        _ => format_ident!("{}", snake),
    }
}

/// Convert an enum literal to a PascalCase variant identifier.
pub fn enum_variant_ident(value: &str) -> proc_macro2::Ident {
    format_ident!("{}", value.to_pascal_case())
}
