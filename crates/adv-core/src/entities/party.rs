use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PartyRole;

/// A registered user that can be referenced by cases.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Party {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: PartyRole,
    pub created_at: DateTime<Utc>,
}
