use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A persisted notification row. Delivery is handled outside this workspace.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub priority: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
