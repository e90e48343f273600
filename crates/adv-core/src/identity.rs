use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PartyRole;

/// Authenticated caller identity.
///
/// Produced by whatever session layer fronts the engine and trusted as-is for
/// coarse role checks. Per-record ownership checks happen in `adv-db`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: PartyRole,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: PartyRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    #[must_use]
    pub fn is_athlete(&self) -> bool {
        self.role == PartyRole::Athlete
    }
}
