//! The content entity catalog.
//!
//! [`Catalog::new`] composes every entity schema from the shared [`Blocks`]
//! once. Callers keep the catalog (by reference or in an `Arc`) and bind a
//! specific [`EntityKind`] to a form or route; there is no global registry.

pub mod blocks;
pub mod entities;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub use blocks::{Blocks, BLOCK_NAMES};

use crate::error::{Result, SchemaError};
use crate::schema::Schema;
use crate::validation::{safe_validate, validate, ValidationError, ValidationResult};

/// Every top-level content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    HomePage,
    AboutPage,
    ContactPage,
    CsrPage,
    GalleryPage,
    IndustriesPage,
    IndividualService,
    Service,
    BlogPost,
    BlogPostPreview,
}

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        EntityKind::HomePage,
        EntityKind::AboutPage,
        EntityKind::ContactPage,
        EntityKind::CsrPage,
        EntityKind::GalleryPage,
        EntityKind::IndustriesPage,
        EntityKind::IndividualService,
        EntityKind::Service,
        EntityKind::BlogPost,
        EntityKind::BlogPostPreview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::HomePage => "home-page",
            EntityKind::AboutPage => "about-page",
            EntityKind::ContactPage => "contact-page",
            EntityKind::CsrPage => "csr-page",
            EntityKind::GalleryPage => "gallery-page",
            EntityKind::IndustriesPage => "industries-page",
            EntityKind::IndividualService => "individual-service",
            EntityKind::Service => "service",
            EntityKind::BlogPost => "blog-post",
            EntityKind::BlogPostPreview => "blog-post-preview",
        }
    }

    fn build(self, blocks: &Blocks) -> Result<Schema> {
        let schema = match self {
            EntityKind::HomePage => entities::home_page(blocks)?,
            EntityKind::AboutPage => entities::about_page(blocks),
            EntityKind::ContactPage => entities::contact_page(blocks),
            EntityKind::CsrPage => entities::csr_page(blocks),
            EntityKind::GalleryPage => entities::gallery_page(blocks),
            EntityKind::IndustriesPage => entities::industries_page(blocks)?,
            EntityKind::IndividualService => entities::individual_service(blocks)?,
            EntityKind::Service => entities::service(),
            EntityKind::BlogPost => entities::blog_post(blocks),
            EntityKind::BlogPostPreview => entities::blog_post_preview(blocks)?,
        };
        Ok(schema)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownEntity(s.to_string()))
    }
}

/// Entity schemas keyed by [`EntityKind`], plus the blocks they were built from.
#[derive(Debug, Clone)]
pub struct Catalog {
    blocks: Blocks,
    entities: Vec<(EntityKind, Schema)>,
}

impl Catalog {
    pub fn new() -> Result<Self> {
        let blocks = Blocks::new();
        let entities = EntityKind::ALL
            .into_iter()
            .map(|kind| kind.build(&blocks).map(|schema| (kind, schema)))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Built content schema catalog: {} entities, {} blocks",
            entities.len(),
            BLOCK_NAMES.len()
        );

        Ok(Catalog { blocks, entities })
    }

    pub fn get(&self, kind: EntityKind) -> &Schema {
        // `entities` is built from `EntityKind::ALL`, in declaration order.
        &self.entities[kind as usize].1
    }

    pub fn lookup(&self, name: &str) -> Result<&Schema> {
        Ok(self.get(name.parse()?))
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityKind, &Schema)> {
        self.entities.iter().map(|(kind, schema)| (*kind, schema))
    }

    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    pub fn block(&self, name: &str) -> Option<&Schema> {
        self.blocks.get(name)
    }

    pub fn safe_validate(&self, kind: EntityKind, input: &Value) -> ValidationResult {
        let result = safe_validate(self.get(kind), input);
        if !result.is_success() {
            log::trace!("{kind} rejected with {} issue(s)", result.issues().len());
        }
        result
    }

    pub fn validate(
        &self,
        kind: EntityKind,
        input: &Value,
    ) -> std::result::Result<Value, ValidationError> {
        validate(self.get(kind), input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::describe;

    #[test]
    fn test_entity_order_matches_discriminants() {
        let catalog = Catalog::new().unwrap();
        for (index, (kind, _)) in catalog.entities().enumerate() {
            assert_eq!(kind as usize, index);
        }
    }

    #[test]
    fn test_entity_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.to_string())
            );
        }
        assert!(matches!(
            "landing-page".parse::<EntityKind>(),
            Err(SchemaError::UnknownEntity(name)) if name == "landing-page"
        ));
    }

    #[test]
    fn test_every_entity_is_an_object() {
        let catalog = Catalog::new().unwrap();
        for (kind, schema) in catalog.entities() {
            assert!(schema.shape().is_ok(), "{kind} is not an object schema");
            assert_eq!(describe(schema)["type"], "object");
        }
    }

    #[test]
    fn test_banner_is_shared_across_pages() {
        let catalog = Catalog::new().unwrap();
        let expected = describe(&catalog.blocks().banner);
        for kind in [
            EntityKind::HomePage,
            EntityKind::AboutPage,
            EntityKind::ContactPage,
            EntityKind::CsrPage,
            EntityKind::GalleryPage,
            EntityKind::IndustriesPage,
            EntityKind::IndividualService,
        ] {
            let shape = catalog.get(kind).shape().unwrap();
            assert_eq!(describe(shape.get("banner").unwrap()), expected, "{kind}");
        }
    }

    #[test]
    fn test_lookup_unknown() {
        let catalog = Catalog::new().unwrap();
        assert!(catalog.lookup("blog-post").is_ok());
        assert!(catalog.lookup("blog").is_err());
        assert!(catalog.block("faq").is_some());
    }
}
