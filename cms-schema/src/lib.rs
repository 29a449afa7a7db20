//! Content schemas for the CMS admin panel.
//!
//! Schemas are immutable trees built from primitive validators (`string`,
//! `slug`, `date`, ...), modifier combinators (`optional`, `with_default`,
//! `array`, `refine`) and object composition (`object`, `shape`, `pick`).
//! The [`catalog`] module assembles every content entity from shared blocks,
//! and [`validate`] / [`safe_validate`] walk an untyped JSON value against a
//! schema, returning normalized data or the full list of issues.
//!
//! ```
//! use cms_schema::prelude::*;
//! use serde_json::json;
//!
//! let author = object(
//!     Shape::new()
//!         .field("name", string().min_length(1))
//!         .field("email", email()),
//! );
//!
//! let result = safe_validate(&author, &json!({ "name": "Jo", "email": "nope" }));
//! assert_eq!(result.issues()[0].dotted_path(), "email");
//! ```

pub mod catalog;
pub mod error;
pub mod schema;
pub mod validation;

pub use catalog::{Catalog, EntityKind};
pub use error::{Result, SchemaError};
pub use schema::{describe, Schema, Shape};
pub use validation::{
    safe_validate, slugify, validate, validate_as, Issue, IssueKind, PathSegment,
    ValidationError, ValidationResult,
};

/// Everything needed to declare schemas.
pub mod prelude {
    pub use crate::schema::builder::{
        array_min, array_of, boolean, date, email, enum_of, number, object, optional, refine,
        slug, string, url, uuid, with_default, Compose,
    };
    pub use crate::schema::{Primitive, PrimitiveKind, Schema, Shape};
    pub use crate::validation::{safe_validate, validate, ValidationResult};
}
