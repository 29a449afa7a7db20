use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SchemaError};

/// An immutable description of an accepted value shape.
///
/// Nested nodes are reference counted, so cloning a schema (or embedding a
/// block schema in many entities) is cheap and never copies the tree.
#[derive(Debug, Clone)]
pub enum Schema {
    Primitive(Primitive),
    EnumOf(Arc<[String]>),
    ObjectOf(ObjectSchema),
    ArrayOf {
        element: Arc<Schema>,
        min_items: usize,
    },
    Optional(Arc<Schema>),
    WithDefault {
        inner: Arc<Schema>,
        default: Value,
    },
    Refined {
        inner: Arc<Schema>,
        predicate: Predicate,
        message: String,
    },
}

/// Atomic value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Uuid,
    Url,
    Email,
    Slug,
    Date,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Uuid => "uuid",
            PrimitiveKind::Url => "url",
            PrimitiveKind::Email => "email",
            PrimitiveKind::Slug => "slug",
            PrimitiveKind::Date => "date",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A primitive kind plus its declared constraints.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub constraints: Constraints,
}

#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub integer: bool,
    pub pattern: Option<Pattern>,
}

/// A regex every matching string must satisfy, with the message reported otherwise.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub regex: Regex,
    pub message: String,
}

/// Custom check applied by [`Schema::Refined`] after the inner schema succeeds.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Predicate(Arc::new(check))
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Ordered field-name to schema mapping underlying an object schema.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: Vec<(String, Schema)>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. A name that is already declared keeps its position and
    /// takes the new schema.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let name = name.into();
        let schema = schema.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = schema,
            None => self.fields.push((name, schema)),
        }
        self
    }

    /// Splice every field of `other` in as direct siblings of this shape's fields.
    pub fn extend(self, other: Shape) -> Self {
        other
            .fields
            .into_iter()
            .fold(self, |shape, (name, schema)| shape.field(name, schema))
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, schema)| schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Schema)> for Shape {
    fn from_iter<I: IntoIterator<Item = (K, Schema)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Shape::new(), |shape, (name, schema)| shape.field(name, schema))
    }
}

/// Named-field record schema. Unknown input keys are stripped.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    shape: Arc<Shape>,
}

impl ObjectSchema {
    pub fn new(shape: Shape) -> Self {
        ObjectSchema {
            shape: Arc::new(shape),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl From<Primitive> for Schema {
    fn from(primitive: Primitive) -> Self {
        Schema::Primitive(primitive)
    }
}

impl Schema {
    /// Short name of the node's variant, used in messages and descriptions.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Schema::Primitive(p) => p.kind.as_str(),
            Schema::EnumOf(_) => "enum",
            Schema::ObjectOf(_) => "object",
            Schema::ArrayOf { .. } => "array",
            Schema::Optional(_) => "optional",
            Schema::WithDefault { .. } => "default",
            Schema::Refined { .. } => "refined",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Schema::Optional(_))
    }

    /// Extract the field mapping of an object schema so it can be spliced
    /// into a different parent.
    pub fn shape(&self) -> Result<Shape> {
        match self {
            Schema::ObjectOf(object) => Ok(object.shape().clone()),
            other => Err(SchemaError::NotAnObject(other.kind_name())),
        }
    }

    /// Derive an object schema holding only `names`, in declared order.
    pub fn pick(&self, names: &[&str]) -> Result<Schema> {
        let shape = self.shape()?;
        if let Some(missing) = names.iter().find(|name| !shape.contains(name)) {
            return Err(SchemaError::UnknownField {
                field: missing.to_string(),
            });
        }
        let picked = shape
            .iter()
            .filter(|(name, _)| names.contains(name))
            .map(|(name, schema)| (name, schema.clone()))
            .collect();
        Ok(Schema::ObjectOf(ObjectSchema::new(picked)))
    }

    /// Derive an object schema without `names`.
    pub fn omit(&self, names: &[&str]) -> Result<Schema> {
        let shape = self.shape()?;
        if let Some(missing) = names.iter().find(|name| !shape.contains(name)) {
            return Err(SchemaError::UnknownField {
                field: missing.to_string(),
            });
        }
        let kept = shape
            .iter()
            .filter(|(name, _)| !names.contains(name))
            .map(|(name, schema)| (name, schema.clone()))
            .collect();
        Ok(Schema::ObjectOf(ObjectSchema::new(kept)))
    }

    /// Derive an object schema where every top-level field may be absent.
    pub fn partial(&self) -> Result<Schema> {
        let shape = self.shape()?;
        let relaxed = shape
            .iter()
            .map(|(name, schema)| {
                let schema = if schema.is_optional() {
                    schema.clone()
                } else {
                    Schema::Optional(Arc::new(schema.clone()))
                };
                (name, schema)
            })
            .collect();
        Ok(Schema::ObjectOf(ObjectSchema::new(relaxed)))
    }
}
