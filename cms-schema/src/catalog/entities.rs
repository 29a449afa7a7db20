// Top-level content entities composed from the shared blocks

use regex::Regex;
use std::sync::OnceLock;

use super::blocks::{empty_list, Blocks};
use crate::error::Result;
use crate::schema::builder::*;
use crate::schema::{Schema, Shape};

const PHONE_PATTERN: &str = r"^\+?[0-9()\-\s]{7,20}$";

fn phone_regex() -> Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"))
        .clone()
}

pub fn service() -> Schema {
    object(
        Shape::new()
            .field("title", string().min_length(1).max_length(120))
            .field("slug", slug())
            .field("shortDescription", string().min_length(1).max_length(200))
            .field("description", string().optional())
            .field("icon", url().optional())
            .field("image", url().optional())
            .field("order", number().integer().min(0.0).with_default(0))
            .field("isFeatured", boolean().with_default(false)),
    )
}

/// A service's own fields spliced in next to its page sections.
pub fn individual_service(blocks: &Blocks) -> Result<Schema> {
    let sections = Shape::new()
        .field("banner", blocks.banner.clone())
        .field("overview", blocks.content_box.clone())
        .field("features", blocks.content_box.clone().array().with_default(empty_list()))
        .field("process", blocks.list.clone().optional())
        .field("faqs", blocks.faq.clone().array().with_default(empty_list()))
        .field("cta", blocks.cta.clone().optional())
        .field("metadata", blocks.metadata.clone());
    Ok(object(service().shape()?.extend(sections)))
}

pub fn home_page(blocks: &Blocks) -> Result<Schema> {
    let service_card = service().pick(&["title", "slug", "shortDescription", "icon"])?;
    Ok(object(
        Shape::new()
            .field("banner", blocks.banner.clone())
            .field("counters", blocks.counter.clone().array().with_default(empty_list()))
            .field("services", service_card.array().with_default(empty_list()))
            .field("highlights", blocks.content_box.clone().array().with_default(empty_list()))
            .field("gallery", blocks.gallery.clone().optional())
            .field("faqs", blocks.faq.clone().array().with_default(empty_list()))
            .field("cta", blocks.cta.clone())
            .field("metadata", blocks.metadata.clone()),
    ))
}

pub fn about_page(blocks: &Blocks) -> Schema {
    object(
        Shape::new()
            .field("banner", blocks.banner.clone())
            .field("introduction", blocks.content_box.clone())
            .field("mission", blocks.content_box.clone())
            .field("vision", blocks.content_box.clone())
            .field("values", blocks.list.clone().optional())
            .field("counters", blocks.counter.clone().array().with_default(empty_list()))
            .field("cta", blocks.cta.clone().optional())
            .field("metadata", blocks.metadata.clone()),
    )
}

pub fn contact_page(blocks: &Blocks) -> Schema {
    object(
        Shape::new()
            .field("banner", blocks.banner.clone())
            .field("form", blocks.form.clone())
            .field("address", string().min_length(1).max_length(300))
            .field("phone", string().pattern(phone_regex(), "Invalid phone number"))
            .field("email", email())
            .field("mapEmbedUrl", url().optional())
            .field("businessHours", blocks.list.clone().optional())
            .field("metadata", blocks.metadata.clone()),
    )
}

pub fn csr_page(blocks: &Blocks) -> Schema {
    object(
        Shape::new()
            .field("banner", blocks.banner.clone())
            .field("introduction", blocks.content_box.clone())
            .field("initiatives", blocks.content_box.clone().array_min(1))
            .field("gallery", blocks.gallery.clone().optional())
            .field("cta", blocks.cta.clone().optional())
            .field("metadata", blocks.metadata.clone()),
    )
}

pub fn gallery_page(blocks: &Blocks) -> Schema {
    object(
        Shape::new()
            .field("banner", blocks.banner.clone())
            .field("galleries", blocks.gallery.clone().array().with_default(empty_list()))
            .field("metadata", blocks.metadata.clone()),
    )
}

/// Each industry is a content box with its own slug, flattened into one record.
pub fn industries_page(blocks: &Blocks) -> Result<Schema> {
    let industry = object(blocks.content_box.shape()?.field("slug", slug()));
    Ok(object(
        Shape::new()
            .field("banner", blocks.banner.clone())
            .field("introduction", string().optional())
            .field("industries", industry.array_min(1))
            .field("cta", blocks.cta.clone().optional())
            .field("metadata", blocks.metadata.clone()),
    ))
}

pub fn blog_post(blocks: &Blocks) -> Schema {
    object(
        Shape::new()
            .field("title", string().min_length(5).max_length(150))
            .field("slug", slug())
            .field("content", string().min_length(1))
            .field("excerpt", string().max_length(300).optional())
            .field("coverImage", url().optional())
            .field("tags", string().min_length(1).array().with_default(empty_list()))
            .field(
                "status",
                enum_of(["draft", "published", "archived"]).with_default("draft"),
            )
            .field("publishedAt", date().optional())
            .field("metadata", blocks.metadata.clone())
            .field("author", blocks.author.clone()),
    )
}

/// Title and content only, for list previews.
pub fn blog_post_preview(blocks: &Blocks) -> Result<Schema> {
    blog_post(blocks).pick(&["title", "content"])
}
