use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An append-only audit log entry recording one state-changing action.
///
/// `seq` is assigned by storage and strictly increases with insertion order;
/// it breaks ties between entries with identical `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEntry {
    pub seq: i64,
    pub id: String,
    pub actor_id: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub changes: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
