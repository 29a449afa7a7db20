//! cms-schema code generation - Rust result types for entity schemas.
//!
//! Every entity in the [`Catalog`] becomes a serde struct whose fields mirror
//! the schema's declared fields, so validated data can be decoded with
//! [`cms_schema::validate_as`]. Nested objects become their own structs
//! (`BlogPostAuthor`), literal sets become enums (`BlogPostStatus`).

mod enum_gen;
mod generator;
mod struct_gen;
pub mod type_utils;

use cms_schema::{Catalog, Schema};

/// Generate Rust types for every catalog entity and write them to `output_path`.
///
/// # Example
///
/// ```no_run
/// // In build.rs:
/// let catalog = cms_schema::Catalog::new().unwrap();
/// cms_schema_codegen::write_catalog_types(&catalog, "src/generated.rs").unwrap();
/// ```
pub fn write_catalog_types(
    catalog: &Catalog,
    output_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let formatted = generate_for_catalog(catalog)?;
    std::fs::write(output_path, formatted)?;
    log::info!("Wrote catalog types to {output_path}");
    Ok(())
}

/// Generate Rust types for every catalog entity as formatted source.
pub fn generate_for_catalog(catalog: &Catalog) -> Result<String, Box<dyn std::error::Error>> {
    let tokens = generator::generate_catalog(catalog)?;
    Ok(generator::format_token_stream(&tokens)?)
}

/// Generate Rust types for a single object schema named `name`
/// (kebab-case, e.g. `"landing-page"`).
pub fn generate_for_schema(
    name: &str,
    schema: &Schema,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut registry = generator::Registry::default();
    generator::generate_entity(name, schema, &mut registry)?;
    Ok(generator::format_token_stream(&registry.into_tokens())?)
}
