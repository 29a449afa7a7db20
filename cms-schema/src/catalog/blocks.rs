// Reusable content blocks embedded by the page and post entities

use serde_json::json;

use crate::schema::builder::*;
use crate::schema::{Schema, Shape};

/// Every block schema, built once and shared by the entity builders.
#[derive(Debug, Clone)]
pub struct Blocks {
    pub button: Schema,
    pub banner: Schema,
    pub cta: Schema,
    pub content_box: Schema,
    pub counter: Schema,
    pub faq: Schema,
    pub form_field: Schema,
    pub form: Schema,
    pub gallery_image: Schema,
    pub gallery: Schema,
    pub list: Schema,
    pub author: Schema,
    pub metadata: Schema,
}

/// Names accepted by [`Blocks::get`], in declaration order.
pub const BLOCK_NAMES: &[&str] = &[
    "button",
    "banner",
    "cta",
    "content-box",
    "counter",
    "faq",
    "form-field",
    "form",
    "gallery-image",
    "gallery",
    "list",
    "author",
    "metadata",
];

impl Blocks {
    pub fn new() -> Self {
        let button = button();
        let banner = banner(&button);
        let cta = cta(&button);
        let content_box = content_box(&button);
        let form_field = form_field();
        let form = form(&form_field);
        let gallery_image = gallery_image();
        let gallery = gallery(&gallery_image);

        Blocks {
            button,
            banner,
            cta,
            content_box,
            counter: counter(),
            faq: faq(),
            form_field,
            form,
            gallery_image,
            gallery,
            list: list(),
            author: author(),
            metadata: metadata(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        let block = match name {
            "button" => &self.button,
            "banner" => &self.banner,
            "cta" => &self.cta,
            "content-box" => &self.content_box,
            "counter" => &self.counter,
            "faq" => &self.faq,
            "form-field" => &self.form_field,
            "form" => &self.form,
            "gallery-image" => &self.gallery_image,
            "gallery" => &self.gallery,
            "list" => &self.list,
            "author" => &self.author,
            "metadata" => &self.metadata,
            _ => return None,
        };
        Some(block)
    }
}

impl Default for Blocks {
    fn default() -> Self {
        Self::new()
    }
}

fn button() -> Schema {
    object(
        Shape::new()
            .field("text", string().min_length(1).max_length(50))
            .field("url", url())
            .field(
                "variant",
                enum_of(["primary", "secondary", "outline"]).with_default("primary"),
            )
            .field("openInNewTab", boolean().with_default(false)),
    )
}

fn banner(button: &Schema) -> Schema {
    object(
        Shape::new()
            .field("title", string().min_length(1).max_length(120))
            .field("subtitle", string().max_length(200).optional())
            .field("description", string().optional())
            .field("backgroundImage", url())
            .field("button", button.clone().optional()),
    )
}

fn cta(button: &Schema) -> Schema {
    object(
        Shape::new()
            .field("title", string().min_length(1).max_length(120))
            .field("description", string().optional())
            .field("button", button.clone()),
    )
}

fn content_box(button: &Schema) -> Schema {
    object(
        Shape::new()
            .field("title", string().min_length(1).max_length(120))
            .field("description", string().min_length(1))
            .field("image", url().optional())
            .field("button", button.clone().optional()),
    )
}

fn counter() -> Schema {
    object(
        Shape::new()
            .field("label", string().min_length(1).max_length(60))
            .field("value", number().min(0.0))
            .field("prefix", string().max_length(5).optional())
            .field("suffix", string().max_length(5).optional()),
    )
}

fn faq() -> Schema {
    object(
        Shape::new()
            .field("question", string().min_length(1).max_length(250))
            .field("answer", string().min_length(1)),
    )
}

fn form_field() -> Schema {
    object(
        Shape::new()
            .field("name", string().min_length(1).max_length(50))
            .field("label", string().min_length(1).max_length(100))
            .field(
                "type",
                enum_of(["text", "email", "tel", "textarea", "select", "checkbox"])
                    .with_default("text"),
            )
            .field("placeholder", string().optional())
            .field("required", boolean().with_default(false))
            .field("options", string().min_length(1).array().optional()),
    )
    .refine(
        |field| {
            field["type"] != "select"
                || field["options"].as_array().map_or(false, |o| !o.is_empty())
        },
        "Select fields need at least one option",
    )
}

fn form(form_field: &Schema) -> Schema {
    object(
        Shape::new()
            .field("title", string().min_length(1).max_length(120))
            .field("description", string().optional())
            .field("fields", form_field.clone().array_min(1))
            .field("submitText", string().min_length(1).with_default("Submit"))
            .field("successMessage", string().optional())
            .field("recipientEmail", email().optional()),
    )
}

fn gallery_image() -> Schema {
    object(
        Shape::new()
            .field("url", url())
            .field("alt", string().max_length(150).with_default(""))
            .field("caption", string().max_length(250).optional()),
    )
}

fn gallery(image: &Schema) -> Schema {
    object(
        Shape::new()
            .field("title", string().max_length(120).optional())
            .field("images", image.clone().array_min(1)),
    )
}

fn list() -> Schema {
    object(
        Shape::new()
            .field("title", string().min_length(1).max_length(120))
            .field("items", string().min_length(1).array_min(1)),
    )
}

fn author() -> Schema {
    object(
        Shape::new()
            .field("name", string().min_length(1).max_length(100))
            .field("email", email())
            .field("avatar", url().optional())
            .field("bio", string().max_length(500).optional()),
    )
}

/// SEO metadata. Every field is optional so `{}` is a valid value.
fn metadata() -> Schema {
    object(
        Shape::new()
            .field("metaTitle", string().max_length(60).optional())
            .field("metaDescription", string().max_length(160).optional())
            .field("keywords", string().min_length(1).array().optional())
            .field("ogImage", url().optional())
            .field("canonicalUrl", url().optional())
            .field("noIndex", boolean().optional()),
    )
}

/// Default for optional page sections that hold a list of blocks.
pub(crate) fn empty_list() -> serde_json::Value {
    json!([])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::safe_validate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_block_name_resolves() {
        let blocks = Blocks::new();
        for name in BLOCK_NAMES {
            assert!(blocks.get(name).is_some(), "missing block {name}");
        }
        assert!(blocks.get("carousel").is_none());
    }

    #[test]
    fn test_button_defaults() {
        let blocks = Blocks::new();
        let result = safe_validate(
            &blocks.button,
            &json!({ "text": "Contact us", "url": "https://example.com/contact" }),
        );
        assert_eq!(
            result.data(),
            Some(&json!({
                "text": "Contact us",
                "url": "https://example.com/contact",
                "variant": "primary",
                "openInNewTab": false
            }))
        );
    }

    #[test]
    fn test_banner_nested_button_path() {
        let blocks = Blocks::new();
        let result = safe_validate(
            &blocks.banner,
            &json!({
                "title": "Welcome",
                "backgroundImage": "https://cdn.example.com/hero.jpg",
                "button": { "text": "Go", "url": "contact" }
            }),
        );
        let paths: Vec<_> = result.issues().iter().map(|i| i.dotted_path()).collect();
        assert_eq!(paths, vec!["button.url"]);
    }

    #[test]
    fn test_metadata_accepts_empty_object() {
        let blocks = Blocks::new();
        assert_eq!(
            safe_validate(&blocks.metadata, &json!({})).data(),
            Some(&json!({}))
        );
    }

    #[test]
    fn test_select_field_requires_options() {
        let blocks = Blocks::new();
        let result = safe_validate(
            &blocks.form_field,
            &json!({ "name": "topic", "label": "Topic", "type": "select" }),
        );
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].message, "Select fields need at least one option");

        let result = safe_validate(
            &blocks.form_field,
            &json!({ "name": "topic", "label": "Topic", "type": "select", "options": ["Sales"] }),
        );
        assert!(result.is_success());
    }

    #[test]
    fn test_gallery_needs_an_image() {
        let blocks = Blocks::new();
        let result = safe_validate(&blocks.gallery, &json!({ "images": [] }));
        assert_eq!(result.issues()[0].dotted_path(), "images");
        assert_eq!(result.issues()[0].message, "Array must contain at least 1 element(s)");
    }
}
