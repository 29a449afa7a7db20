use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use crate::error::{Result, SchemaError};
use crate::schema::Schema;

mod primitives;

pub use primitives::{is_email, is_slug, slugify};
use primitives::{type_name, Fault};

/// One step of an issue path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Error taxonomy. Kept in-process only; the wire shape is `{path, message}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IssueKind {
    /// Runtime type disagrees with the expected kind, or date coercion failed.
    InvalidType,
    /// A declared field is absent.
    Required,
    /// Length, bound or item count below the minimum.
    TooSmall,
    TooBig,
    /// uuid/url/email/slug/regex mismatch.
    InvalidFormat,
    InvalidEnum,
    /// Refinement predicate rejected the value.
    #[default]
    Custom,
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub path: Vec<PathSegment>,
    pub message: String,
    #[serde(skip)]
    pub kind: IssueKind,
}

impl Issue {
    /// Path joined with dots, e.g. `banner.button.url` or `images.1.url`.
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.dotted_path(), self.message)
        }
    }
}

/// Outcome of [`safe_validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Success(Value),
    Failure(Vec<Issue>),
}

impl ValidationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ValidationResult::Success(data) => Some(data),
            ValidationResult::Failure(_) => None,
        }
    }

    /// Issues in path order; empty on success.
    pub fn issues(&self) -> &[Issue] {
        match self {
            ValidationResult::Success(_) => &[],
            ValidationResult::Failure(issues) => issues,
        }
    }

    pub fn into_result(self) -> std::result::Result<Value, ValidationError> {
        match self {
            ValidationResult::Success(data) => Ok(data),
            ValidationResult::Failure(issues) => Err(ValidationError { issues }),
        }
    }
}

// {"success": true, "data": ...} | {"success": false, "issues": [...]}
impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        match self {
            ValidationResult::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            ValidationResult::Failure(issues) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("issues", issues)?;
            }
        }
        state.end()
    }
}

/// Raised by [`validate`]; always carries the complete issue list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed with {} issue(s):\n  - {}", .issues.len(), join_issues(.issues))]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  - ")
}

/// Validate `input`, returning the normalized value or every issue found.
pub fn safe_validate(schema: &Schema, input: &Value) -> ValidationResult {
    let mut walker = Walker::default();
    let parsed = walker.walk(schema, Some(input));

    match parsed {
        Parsed::Value(value) if walker.issues.is_empty() => {
            return ValidationResult::Success(value)
        }
        // only a missing key is absent, and the root input is always present
        Parsed::Absent => unreachable!("root input reported as absent"),
        Parsed::Value(_) | Parsed::Invalid => {}
    }

    log::debug!(
        "validation against {} schema failed with {} issue(s)",
        schema.kind_name(),
        walker.issues.len()
    );
    ValidationResult::Failure(walker.issues)
}

/// Validate `input`, failing with a [`ValidationError`] that holds every issue.
pub fn validate(schema: &Schema, input: &Value) -> std::result::Result<Value, ValidationError> {
    safe_validate(schema, input).into_result()
}

/// Validate `input` and decode the normalized value into `T`.
pub fn validate_as<T: DeserializeOwned>(schema: &Schema, input: &Value) -> Result<T> {
    let data = validate(schema, input)?;
    serde_json::from_value(data).map_err(|e| SchemaError::Decode(e.to_string()))
}

/// Result of walking one schema node.
enum Parsed {
    Value(Value),
    /// Optional field with no key in the parent; left out of the output.
    Absent,
    Invalid,
}

#[derive(Default)]
struct Walker {
    path: Vec<PathSegment>,
    issues: Vec<Issue>,
}

impl Walker {
    fn report(&mut self, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(Issue {
            path: self.path.clone(),
            message: message.into(),
            kind,
        });
    }

    fn report_faults(&mut self, faults: Vec<Fault>) {
        for fault in faults {
            self.report(fault.kind, fault.message);
        }
    }

    fn walk(&mut self, schema: &Schema, input: Option<&Value>) -> Parsed {
        match schema {
            Schema::Optional(inner) => match input {
                None => Parsed::Absent,
                Some(_) => self.walk(inner, input),
            },
            Schema::WithDefault { inner, default } => match input {
                None => Parsed::Value(default.clone()),
                Some(_) => self.walk(inner, input),
            },
            Schema::Refined {
                inner,
                predicate,
                message,
            } => {
                let parsed = self.walk(inner, input);
                if let Parsed::Value(value) = &parsed {
                    if !predicate.test(value) {
                        self.report(IssueKind::Custom, message.as_str());
                        return Parsed::Invalid;
                    }
                }
                parsed
            }
            _ => {
                let Some(value) = input else {
                    self.report(IssueKind::Required, "Required");
                    return Parsed::Invalid;
                };
                self.walk_present(schema, value)
            }
        }
    }

    fn walk_present(&mut self, schema: &Schema, value: &Value) -> Parsed {
        match schema {
            Schema::Primitive(primitive) => match primitives::check(primitive, value) {
                Ok(normalized) => Parsed::Value(normalized),
                Err(faults) => {
                    self.report_faults(faults);
                    Parsed::Invalid
                }
            },
            Schema::EnumOf(options) => self.walk_enum(options, value),
            Schema::ObjectOf(object) => {
                let Some(map) = value.as_object() else {
                    self.report_faults(vec![Fault::type_mismatch("object", value)]);
                    return Parsed::Invalid;
                };
                let mut output = Map::new();
                let mut failed = false;
                for (name, field) in object.shape().iter() {
                    self.path.push(PathSegment::Key(name.to_string()));
                    let parsed = self.walk(field, map.get(name));
                    self.path.pop();
                    match parsed {
                        Parsed::Value(v) => {
                            output.insert(name.to_string(), v);
                        }
                        Parsed::Absent => {}
                        Parsed::Invalid => failed = true,
                    }
                }
                if failed {
                    Parsed::Invalid
                } else {
                    Parsed::Value(Value::Object(output))
                }
            }
            Schema::ArrayOf { element, min_items } => {
                let Some(items) = value.as_array() else {
                    self.report_faults(vec![Fault::type_mismatch("array", value)]);
                    return Parsed::Invalid;
                };
                let mut failed = false;
                if items.len() < *min_items {
                    self.report(
                        IssueKind::TooSmall,
                        format!("Array must contain at least {min_items} element(s)"),
                    );
                    failed = true;
                }
                let mut output = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    self.path.push(PathSegment::Index(index));
                    let parsed = self.walk(element, Some(item));
                    self.path.pop();
                    match parsed {
                        Parsed::Value(v) => output.push(v),
                        Parsed::Absent => {}
                        Parsed::Invalid => failed = true,
                    }
                }
                if failed {
                    Parsed::Invalid
                } else {
                    Parsed::Value(Value::Array(output))
                }
            }
            Schema::Optional(_) | Schema::WithDefault { .. } | Schema::Refined { .. } => {
                self.walk(schema, Some(value))
            }
        }
    }

    fn walk_enum(&mut self, options: &[String], value: &Value) -> Parsed {
        let expected = options
            .iter()
            .map(|option| format!("'{option}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        match value.as_str() {
            Some(text) if options.iter().any(|option| option == text) => {
                Parsed::Value(value.clone())
            }
            Some(text) => {
                self.report(
                    IssueKind::InvalidEnum,
                    format!("Invalid enum value. Expected {expected}, received '{text}'"),
                );
                Parsed::Invalid
            }
            None => {
                self.report(
                    IssueKind::InvalidType,
                    format!("Expected {expected}, received {}", type_name(value)),
                );
                Parsed::Invalid
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builder::*;
    use crate::schema::Shape;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paths(result: &ValidationResult) -> Vec<String> {
        result.issues().iter().map(Issue::dotted_path).collect()
    }

    #[test]
    fn test_required_field_single_issue() {
        let schema = object(
            Shape::new()
                .field("title", string())
                .field("author", object(Shape::new().field("name", string()))),
        );

        let result = safe_validate(&schema, &json!({ "author": { "name": "Jo" } }));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].path, vec![PathSegment::from("title")]);
        assert_eq!(result.issues()[0].message, "Required");
        assert_eq!(result.issues()[0].kind, IssueKind::Required);

        let result = safe_validate(&schema, &json!({ "title": "x" }));
        assert_eq!(paths(&result), vec!["author"]);
    }

    #[test]
    fn test_optional_absent_is_omitted() {
        let schema = object(Shape::new().field("subtitle", string().optional()));
        let result = safe_validate(&schema, &json!({}));
        assert_eq!(result, ValidationResult::Success(json!({})));
    }

    #[test]
    fn test_optional_null_is_failure() {
        let schema = object(Shape::new().field("subtitle", string().optional()));
        let result = safe_validate(&schema, &json!({ "subtitle": null }));
        assert_eq!(paths(&result), vec!["subtitle"]);
        assert_eq!(result.issues()[0].message, "Expected string, received null");
    }

    #[test]
    fn test_default_is_trusted() {
        let schema = object(Shape::new().field("count", number().min(10.0).with_default(1)));
        let result = safe_validate(&schema, &json!({}));
        assert_eq!(result, ValidationResult::Success(json!({ "count": 1 })));

        let result = safe_validate(&schema, &json!({ "count": 2 }));
        assert_eq!(paths(&result), vec!["count"]);
    }

    #[test]
    fn test_array_index_paths() {
        let schema = string().min_length(1).array();
        let result = safe_validate(&schema, &json!(["ok", ""]));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].path, vec![PathSegment::Index(1)]);
    }

    #[test]
    fn test_array_collects_every_element() {
        let schema = object(Shape::new().field("tags", string().min_length(1).array_min(4)));
        let result = safe_validate(&schema, &json!({ "tags": ["", "a", ""] }));
        assert_eq!(paths(&result), vec!["tags", "tags.0", "tags.2"]);
        assert_eq!(
            result.issues()[0].message,
            "Array must contain at least 4 element(s)"
        );
    }

    #[test]
    fn test_unknown_keys_are_stripped() {
        let schema = object(Shape::new().field("title", string()));
        let result = safe_validate(&schema, &json!({ "title": "x", "bogus": 1 }));
        assert_eq!(result, ValidationResult::Success(json!({ "title": "x" })));
    }

    #[test]
    fn test_object_type_mismatch() {
        let schema = object(Shape::new().field("title", string()));
        let result = safe_validate(&schema, &Value::Null);
        assert_eq!(result.issues()[0].message, "Expected object, received null");
        assert!(result.issues()[0].path.is_empty());

        let result = safe_validate(&schema, &json!("page"));
        assert_eq!(result.issues()[0].message, "Expected object, received string");
    }

    #[test]
    fn test_nested_paths_and_declared_order() {
        let button = object(
            Shape::new()
                .field("text", string().min_length(1))
                .field("url", url()),
        );
        let schema = object(
            Shape::new()
                .field("title", string().min_length(1))
                .field(
                    "banner",
                    object(
                        Shape::new()
                            .field("heading", string().min_length(1))
                            .field("button", button),
                    ),
                )
                .field("slug", slug()),
        );
        let input = json!({
            "slug": "Bad Slug",
            "banner": { "button": { "url": "nope", "text": "" }, "heading": "" },
            "title": ""
        });
        let result = safe_validate(&schema, &input);
        assert_eq!(
            paths(&result),
            vec![
                "title",
                "banner.heading",
                "banner.button.text",
                "banner.button.url",
                "slug"
            ]
        );
    }

    #[test]
    fn test_refinement_runs_after_inner_success() {
        let schema = refine(
            string(),
            |v| v.as_str().map_or(false, |s| s.starts_with('/')),
            "Path must start with '/'",
        );
        assert!(safe_validate(&schema, &json!("/about")).is_success());

        let result = safe_validate(&schema, &json!("about"));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].message, "Path must start with '/'");
        assert_eq!(result.issues()[0].kind, IssueKind::Custom);

        let result = safe_validate(&schema, &json!(3));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].kind, IssueKind::InvalidType);
    }

    #[test]
    fn test_refinement_skipped_when_absent() {
        let schema = object(Shape::new().field(
            "publishedAt",
            date().optional().refine(|_| false, "never"),
        ));
        assert!(safe_validate(&schema, &json!({})).is_success());
    }

    #[test]
    fn test_refinement_sees_defaults() {
        let schema = object(
            Shape::new()
                .field("min", number().with_default(0))
                .field("max", number().with_default(10)),
        )
        .refine(
            |v| v["min"].as_f64() <= v["max"].as_f64(),
            "min must not exceed max",
        );
        assert!(safe_validate(&schema, &json!({ "min": 5 })).is_success());
        let result = safe_validate(&schema, &json!({ "min": 50 }));
        assert_eq!(result.issues()[0].message, "min must not exceed max");
        assert!(result.issues()[0].path.is_empty());
    }

    #[test]
    fn test_enum_messages() {
        let schema = enum_of(["draft", "published"]);
        assert_eq!(
            safe_validate(&schema, &json!("published")),
            ValidationResult::Success(json!("published"))
        );
        let result = safe_validate(&schema, &json!("live"));
        assert_eq!(
            result.issues()[0].message,
            "Invalid enum value. Expected 'draft' | 'published', received 'live'"
        );
        let result = safe_validate(&schema, &json!(1));
        assert_eq!(result.issues()[0].kind, IssueKind::InvalidType);
    }

    #[test]
    fn test_validate_raises_with_full_issue_list() {
        let schema = object(
            Shape::new()
                .field("title", string())
                .field("slug", slug()),
        );
        let err = validate(&schema, &json!({})).unwrap_err();
        assert_eq!(err.issues().len(), 2);
        let text = err.to_string();
        assert!(text.contains("2 issue(s)"));
        assert!(text.contains("title: Required"));
        assert!(text.contains("slug: Required"));
    }

    #[test]
    fn test_result_wire_shape() {
        let schema = object(Shape::new().field("tags", string().min_length(1).array()));
        let failure = safe_validate(&schema, &json!({ "tags": ["ok", ""] }));
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "success": false,
                "issues": [
                    {
                        "path": ["tags", 1],
                        "message": "String must contain at least 1 character(s)"
                    }
                ]
            })
        );

        let success = safe_validate(&schema, &json!({ "tags": [] }));
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({ "success": true, "data": { "tags": [] } })
        );
    }

    #[test]
    fn test_issue_deserializes_from_wire() {
        let wire = json!({ "path": ["images", 0, "url"], "message": "Invalid url" });
        let issue: Issue = serde_json::from_value(wire).unwrap();
        assert_eq!(
            issue.path,
            vec![
                PathSegment::from("images"),
                PathSegment::Index(0),
                PathSegment::from("url")
            ]
        );
        assert_eq!(issue.to_string(), "images.0.url: Invalid url");
    }

    #[test]
    fn test_validate_as_decodes() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Author {
            name: String,
            email: String,
        }

        let schema = object(
            Shape::new()
                .field("name", string().min_length(1))
                .field("email", email()),
        );
        let author: Author =
            validate_as(&schema, &json!({ "name": "Jo", "email": "a@b.com", "x": 1 })).unwrap();
        assert_eq!(
            author,
            Author {
                name: "Jo".into(),
                email: "a@b.com".into()
            }
        );

        let err = validate_as::<Author>(&schema, &json!({ "name": "Jo" })).unwrap_err();
        assert!(matches!(err, SchemaError::Validation(_)));
    }
}
