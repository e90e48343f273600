//! Case status, party roles, and timeline event kinds for Advocate.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! and the same strings are what gets stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CaseError;

// ---------------------------------------------------------------------------
// CaseStatus
// ---------------------------------------------------------------------------

/// Procedural status of a doping case.
///
/// There is no directed transition graph: every status is reachable from
/// every other one, including itself.
///
/// ```text
/// investigation ⇄ charged ⇄ hearing ⇄ appeal ⇄ resolved ⇄ dismissed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Investigation,
    Charged,
    Hearing,
    Appeal,
    Resolved,
    Dismissed,
}

impl CaseStatus {
    /// Every member of the enumerated set, in filing-to-resolution order.
    pub const ALL: [Self; 6] = [
        Self::Investigation,
        Self::Charged,
        Self::Hearing,
        Self::Appeal,
        Self::Resolved,
        Self::Dismissed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Investigation => "investigation",
            Self::Charged => "charged",
            Self::Hearing => "hearing",
            Self::Appeal => "appeal",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CaseError::InvalidStatus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PartyRole
// ---------------------------------------------------------------------------

/// The role a registered party (user) plays in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    Athlete,
    Lawyer,
    Admin,
    Federation,
}

impl PartyRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Athlete => "athlete",
            Self::Lawyer => "lawyer",
            Self::Admin => "admin",
            Self::Federation => "federation",
        }
    }
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyRole {
    type Err = CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "athlete" => Ok(Self::Athlete),
            "lawyer" => Ok(Self::Lawyer),
            "admin" => Ok(Self::Admin),
            "federation" => Ok(Self::Federation),
            other => Err(CaseError::Validation(format!("unknown party role '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// TimelineEventType
// ---------------------------------------------------------------------------

/// Source of a derived timeline event.
///
/// Variant order is the tie-break priority for events that share a
/// timestamp: status changes sort ahead of documents, documents ahead of
/// consultations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventType {
    StatusChange,
    DocumentUpload,
    Consultation,
}

impl TimelineEventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StatusChange => "status_change",
            Self::DocumentUpload => "document_upload",
            Self::Consultation => "consultation",
        }
    }
}

impl fmt::Display for TimelineEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        status_investigation,
        CaseStatus,
        CaseStatus::Investigation,
        "investigation"
    );
    test_serde_roundtrip!(status_dismissed, CaseStatus, CaseStatus::Dismissed, "dismissed");
    test_serde_roundtrip!(role_federation, PartyRole, PartyRole::Federation, "federation");
    test_serde_roundtrip!(
        event_document_upload,
        TimelineEventType,
        TimelineEventType::DocumentUpload,
        "document_upload"
    );

    #[test]
    fn status_parses_from_storage_strings() {
        for status in CaseStatus::ALL {
            assert_eq!(status.as_str().parse::<CaseStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_invalid_status() {
        for raw in ["closed", "", "Charged", "hearing "] {
            let err = raw.parse::<CaseStatus>().unwrap_err();
            assert!(matches!(err, CaseError::InvalidStatus(ref v) if v == raw));
        }
    }

    #[test]
    fn unknown_role_is_validation_error() {
        assert!(matches!(
            "referee".parse::<PartyRole>(),
            Err(CaseError::Validation(_))
        ));
        assert_eq!("lawyer".parse::<PartyRole>().unwrap(), PartyRole::Lawyer);
    }

    #[test]
    fn timeline_priority_order() {
        assert!(TimelineEventType::StatusChange < TimelineEventType::DocumentUpload);
        assert!(TimelineEventType::DocumentUpload < TimelineEventType::Consultation);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", CaseStatus::Appeal), "appeal");
        assert_eq!(format!("{}", PartyRole::Athlete), "athlete");
        assert_eq!(format!("{}", TimelineEventType::StatusChange), "status_change");
    }
}
