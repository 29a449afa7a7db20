use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::generator::Registry;
use crate::type_utils::enum_variant_ident;

/// Generate a value enum like `BlogPostStatus`.
/// When `default_value` is one of the literals, a `Default` impl selects it.
pub fn generate_value_enum(
    type_name: &str,
    values: &[String],
    default_value: Option<&str>,
    registry: &mut Registry,
) {
    if !registry.reserve(type_name) {
        return;
    }
    let type_ident = format_ident!("{}", type_name);

    let variants: Vec<TokenStream> = values
        .iter()
        .map(|value| {
            let variant = enum_variant_ident(value);
            quote! {
                #[serde(rename = #value)]
                #variant,
            }
        })
        .collect();

    let default_impl = default_value
        .filter(|d| values.iter().any(|v| v == d))
        .map(|d| {
            let default_variant = enum_variant_ident(d);
            quote! {
                impl Default for #type_ident {
                    fn default() -> Self {
                        Self::#default_variant
                    }
                }
            }
        });

    registry.push(quote! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum #type_ident {
            #(#variants)*
        }

        #default_impl
    });
}
