use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CaseStatus;

/// Sensitive part of a case. Stored only as an encrypted blob.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaseDetails {
    pub test_result: String,
    pub case_summary: Option<String>,
    /// User ID of the actor who filed the case.
    pub created_by: String,
}

/// One doping-violation legal matter.
///
/// `details` is the decrypted view of the sensitive payload; it is `None`
/// when the stored record has no payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaseRecord {
    pub id: String,
    pub case_number: String,
    pub athlete_id: String,
    pub lawyer_id: Option<String>,
    pub alleged_violation: String,
    pub substance_name: Option<String>,
    pub sample_date: NaiveDate,
    pub notification_date: Option<NaiveDate>,
    pub hearing_date: Option<NaiveDate>,
    pub status: CaseStatus,
    pub details: Option<CaseDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input to `create_case`. `created_by` in the sealed details is taken from
/// the creating actor, not from here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewCase {
    pub athlete_id: String,
    pub lawyer_id: Option<String>,
    pub alleged_violation: String,
    pub substance_name: Option<String>,
    pub sample_date: NaiveDate,
    pub notification_date: Option<NaiveDate>,
    pub hearing_date: Option<NaiveDate>,
    pub test_result: String,
    pub case_summary: Option<String>,
}
