//! Typed audit `changes` payloads.
//!
//! The audit log stores `changes` as free-form JSON. These types give the
//! entries written by the case engine a fixed shape.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CaseStatus;

/// Changes for `case_status_update`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusChangedDetail {
    pub old_status: CaseStatus,
    pub new_status: CaseStatus,
    pub notes: Option<String>,
}

/// Changes for `case_lawyer_assign`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LawyerAssignedDetail {
    pub old_lawyer_id: Option<String>,
    pub new_lawyer_id: String,
}

/// Changes for `case_create`. Never includes the sensitive payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaseCreatedDetail {
    pub case_number: String,
    pub athlete_id: String,
    pub lawyer_id: Option<String>,
    pub status: CaseStatus,
}
