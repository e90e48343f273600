use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A video consultation tied to a case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VideoConsultation {
    pub id: String,
    pub case_id: String,
    pub host_id: String,
    pub scheduled_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
