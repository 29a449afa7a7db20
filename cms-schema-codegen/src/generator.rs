use cms_schema::{Catalog, Schema};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;

use crate::struct_gen::generate_struct;
use crate::type_utils::entity_struct_name;

/// Generated items in emission order. A name is emitted once; later
/// requests for the same name reuse the first definition.
#[derive(Default)]
pub struct Registry {
    names: HashSet<String>,
    items: Vec<TokenStream>,
}

impl Registry {
    /// Reserve `name` before its body is generated so recursive calls skip it.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    pub fn push(&mut self, item: TokenStream) {
        self.items.push(item);
    }

    pub fn into_tokens(self) -> TokenStream {
        let items = self.items;
        quote! {
            use serde::{Deserialize, Serialize};

            #(#items)*
        }
    }
}

/// Generate types for every entity in the catalog.
pub fn generate_catalog(catalog: &Catalog) -> Result<TokenStream, cms_schema::SchemaError> {
    let mut registry = Registry::default();
    for (kind, schema) in catalog.entities() {
        generate_entity(kind.as_str(), schema, &mut registry)?;
    }
    Ok(registry.into_tokens())
}

/// Generate types for one named object schema.
pub fn generate_entity(
    name: &str,
    schema: &Schema,
    registry: &mut Registry,
) -> Result<(), cms_schema::SchemaError> {
    let shape = schema.shape()?;
    let struct_name = entity_struct_name(name);
    let doc = format!(" Validated `{name}` entity.");
    generate_struct(&struct_name, &shape, Some(&doc), registry);
    Ok(())
}

/// Format a TokenStream into pretty-printed Rust source code.
pub fn format_token_stream(tokens: &TokenStream) -> Result<String, syn::Error> {
    let file = syn::parse2::<syn::File>(tokens.clone())?;
    Ok(prettyplease::unparse(&file))
}
