//! Constructors and combinators.
//!
//! Every function and method here takes its input by value and returns a new
//! node; nothing is modified after construction.
//!
//! ```
//! use cms_schema::prelude::*;
//!
//! let tags = string().min_length(1).array().with_default(serde_json::json!([]));
//! assert_eq!(tags.kind_name(), "default");
//! ```

use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

use super::types::{
    Constraints, ObjectSchema, Pattern, Predicate, Primitive, PrimitiveKind, Schema, Shape,
};

fn primitive(kind: PrimitiveKind) -> Primitive {
    Primitive {
        kind,
        constraints: Constraints::default(),
    }
}

pub fn string() -> Primitive {
    primitive(PrimitiveKind::String)
}

pub fn number() -> Primitive {
    primitive(PrimitiveKind::Number)
}

pub fn boolean() -> Primitive {
    primitive(PrimitiveKind::Boolean)
}

pub fn uuid() -> Primitive {
    primitive(PrimitiveKind::Uuid)
}

pub fn url() -> Primitive {
    primitive(PrimitiveKind::Url)
}

pub fn email() -> Primitive {
    primitive(PrimitiveKind::Email)
}

/// Lowercase alphanumerics separated by single hyphens.
pub fn slug() -> Primitive {
    primitive(PrimitiveKind::Slug)
}

/// ISO-8601 string or epoch milliseconds, normalized to an RFC 3339 UTC string.
pub fn date() -> Primitive {
    primitive(PrimitiveKind::Date)
}

impl Primitive {
    pub fn min_length(mut self, len: usize) -> Self {
        self.constraints.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.constraints.max_length = Some(len);
        self
    }

    pub fn min(mut self, bound: f64) -> Self {
        self.constraints.min = Some(bound);
        self
    }

    pub fn max(mut self, bound: f64) -> Self {
        self.constraints.max = Some(bound);
        self
    }

    pub fn integer(mut self) -> Self {
        self.constraints.integer = true;
        self
    }

    pub fn pattern(mut self, regex: Regex, message: impl Into<String>) -> Self {
        self.constraints.pattern = Some(Pattern {
            regex,
            message: message.into(),
        });
        self
    }
}

/// One of a fixed, ordered set of string literals.
pub fn enum_of<I, S>(values: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Schema::EnumOf(values.into_iter().map(Into::into).collect())
}

pub fn object(shape: Shape) -> Schema {
    Schema::ObjectOf(ObjectSchema::new(shape))
}

pub fn optional(schema: impl Into<Schema>) -> Schema {
    Schema::Optional(Arc::new(schema.into()))
}

/// Substitute `default` when the field is absent. The default is trusted and
/// is not checked against `schema`.
pub fn with_default(schema: impl Into<Schema>, default: impl Into<Value>) -> Schema {
    Schema::WithDefault {
        inner: Arc::new(schema.into()),
        default: default.into(),
    }
}

pub fn array_of(element: impl Into<Schema>) -> Schema {
    array_min(element, 0)
}

pub fn array_min(element: impl Into<Schema>, min_items: usize) -> Schema {
    Schema::ArrayOf {
        element: Arc::new(element.into()),
        min_items,
    }
}

pub fn refine<F>(schema: impl Into<Schema>, predicate: F, message: impl Into<String>) -> Schema
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Schema::Refined {
        inner: Arc::new(schema.into()),
        predicate: Predicate::new(predicate),
        message: message.into(),
    }
}

/// Method-style access to the combinators for anything convertible to a [`Schema`].
pub trait Compose: Into<Schema> + Sized {
    fn into_schema(self) -> Schema {
        self.into()
    }

    fn optional(self) -> Schema {
        optional(self)
    }

    fn with_default(self, default: impl Into<Value>) -> Schema {
        with_default(self, default)
    }

    fn array(self) -> Schema {
        array_of(self)
    }

    fn array_min(self, min_items: usize) -> Schema {
        array_min(self, min_items)
    }

    fn refine<F>(self, predicate: F, message: impl Into<String>) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        refine(self, predicate, message)
    }
}

impl Compose for Schema {}
impl Compose for Primitive {}
