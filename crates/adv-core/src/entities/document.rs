use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata of a document filed against a case. File contents live elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LegalDocument {
    pub id: String,
    pub case_id: String,
    pub document_type: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}
