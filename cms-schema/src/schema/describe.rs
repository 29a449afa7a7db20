use serde_json::{json, Map, Value};

use super::types::{Primitive, Schema};

/// Render a schema tree as JSON so form layers can lay out inputs.
///
/// Object fields keep their declared order (they are emitted as an array).
/// Modifiers annotate the node they wrap: `optional`, `default` and
/// `refinements` (messages only, predicates are opaque).
pub fn describe(schema: &Schema) -> Value {
    match schema {
        Schema::Primitive(primitive) => describe_primitive(primitive),
        Schema::EnumOf(values) => json!({ "type": "enum", "values": &**values }),
        Schema::ObjectOf(object) => {
            let fields: Vec<Value> = object
                .shape()
                .iter()
                .map(|(name, field)| json!({ "name": name, "schema": describe(field) }))
                .collect();
            json!({ "type": "object", "fields": fields })
        }
        Schema::ArrayOf { element, min_items } => {
            let mut node = json!({ "type": "array", "items": describe(element) });
            if *min_items > 0 {
                node["minItems"] = json!(min_items);
            }
            node
        }
        Schema::Optional(inner) => annotate(describe(inner), "optional", Value::Bool(true)),
        Schema::WithDefault { inner, default } => {
            annotate(describe(inner), "default", default.clone())
        }
        Schema::Refined { inner, message, .. } => {
            let mut node = describe(inner);
            if let Some(map) = node.as_object_mut() {
                let refinements = map
                    .entry("refinements")
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Some(list) = refinements.as_array_mut() {
                    list.push(Value::String(message.clone()));
                }
            }
            node
        }
    }
}

fn describe_primitive(primitive: &Primitive) -> Value {
    let rules = &primitive.constraints;
    let mut node = Map::new();
    node.insert("type".into(), json!(primitive.kind.as_str()));
    if let Some(min) = rules.min_length {
        node.insert("minLength".into(), json!(min));
    }
    if let Some(max) = rules.max_length {
        node.insert("maxLength".into(), json!(max));
    }
    if let Some(min) = rules.min {
        node.insert("min".into(), json!(min));
    }
    if let Some(max) = rules.max {
        node.insert("max".into(), json!(max));
    }
    if rules.integer {
        node.insert("integer".into(), Value::Bool(true));
    }
    if let Some(pattern) = &rules.pattern {
        node.insert("pattern".into(), json!(pattern.regex.as_str()));
    }
    Value::Object(node)
}

fn annotate(mut node: Value, key: &str, value: Value) -> Value {
    if let Some(map) = node.as_object_mut() {
        map.insert(key.to_string(), value);
    }
    node
}
