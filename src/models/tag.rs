use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A label owned by the tag subsystem. Focus modes embed tags by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>, // hex color for UI
}

/// Body for POST /tags.
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    #[serde(default)]
    pub name: String,
    pub color: Option<String>,
}
