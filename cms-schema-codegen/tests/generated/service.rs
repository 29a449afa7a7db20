use serde::{Deserialize, Serialize};
/// Validated `service` entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    pub slug: String,
    #[serde(rename = "shortDescription")]
    pub short_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(rename = "isFeatured")]
    #[serde(default)]
    pub is_featured: bool,
}
