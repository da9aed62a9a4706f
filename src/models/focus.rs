use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tag::Tag;

/// A named set of tags a user wants active during a focus session.
///
/// `id` is assigned by the store on creation; whatever the client sends on
/// create is ignored. `last_used_at` is only ever written by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusMode {
    #[serde(rename = "focusId", default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}
