use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TimelineEventType;

/// One item of a case's reconstructed history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimelineEvent {
    pub event_type: TimelineEventType,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub actor_id: String,
}
