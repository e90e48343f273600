//! Case Store: creation, lookup, role-scoped listing, and lawyer assignment.
//!
//! Regulatory fields live in plain columns. `CaseDetails` is sealed by the
//! service codec and stored in `encrypted_details`; it is opened only on the
//! read paths (`create_case`, `get_case`, `list_cases_for_user`).

use chrono::{DateTime, Utc};

use adv_core::audit_detail::{CaseCreatedDetail, LawyerAssignedDetail};
use adv_core::case_number::{DISAMBIGUATOR_RANGE, format_case_number};
use adv_core::entities::{CaseDetails, CaseRecord, NewCase};
use adv_core::enums::{CaseStatus, PartyRole};
use adv_core::errors::CaseError;
use adv_core::identity::Actor;
use adv_core::ids::{
    ACTION_CASE_CREATE, ACTION_CASE_LAWYER_ASSIGN, ENTITY_DOPING_CASE, PREFIX_CASE,
};

use crate::error::DatabaseError;
use crate::helpers::{
    format_date, format_datetime, get_opt_string, now, parse_date, parse_datetime, parse_enum,
    parse_optional_date,
};
use crate::new_id;
use crate::repos::audit::{NewAuditEntry, insert_audit};
use crate::repos::notifications::new_case_notification;
use crate::repos::parties::require_role;
use crate::service::{CaseService, finish};

const SELECT_COLS: &str = "id, case_number, athlete_id, lawyer_id, alleged_violation, \
     substance_name, sample_date, ada_notification_date, hearing_date, encrypted_details, \
     case_status, created_at, updated_at";

/// Draws before giving up on an unused case number for one millisecond.
const CASE_NUMBER_ATTEMPTS: usize = 5;

/// A case row as stored: the record without details, plus the sealed blob.
pub(crate) struct StoredCase {
    pub record: CaseRecord,
    pub sealed: Option<String>,
}

fn row_to_stored(row: &libsql::Row) -> Result<StoredCase, DatabaseError> {
    Ok(StoredCase {
        record: CaseRecord {
            id: row.get::<String>(0)?,
            case_number: row.get::<String>(1)?,
            athlete_id: row.get::<String>(2)?,
            lawyer_id: get_opt_string(row, 3)?,
            alleged_violation: row.get::<String>(4)?,
            substance_name: get_opt_string(row, 5)?,
            sample_date: parse_date(&row.get::<String>(6)?)?,
            notification_date: parse_optional_date(get_opt_string(row, 7)?.as_deref())?,
            hearing_date: parse_optional_date(get_opt_string(row, 8)?.as_deref())?,
            status: parse_enum(&row.get::<String>(10)?)?,
            details: None,
            created_at: parse_datetime(&row.get::<String>(11)?)?,
            updated_at: parse_datetime(&row.get::<String>(12)?)?,
        },
        sealed: get_opt_string(row, 9)?,
    })
}

/// Load one case on `conn`, which may be an open transaction.
pub(crate) async fn load_case(
    conn: &libsql::Connection,
    case_id: &str,
) -> Result<Option<StoredCase>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM doping_cases WHERE id = ?1"),
            [case_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_stored(&row)?)),
        None => Ok(None),
    }
}

/// Draw a random disambiguator in SQL until the case number is unused.
async fn unused_case_number(
    conn: &libsql::Connection,
    created_at: DateTime<Utc>,
) -> Result<String, DatabaseError> {
    for _ in 0..CASE_NUMBER_ATTEMPTS {
        let mut rows = conn
            .query(
                "SELECT abs(random() % ?1)",
                [i64::from(DISAMBIGUATOR_RANGE)],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let drawn = u32::try_from(row.get::<i64>(0)?)
            .map_err(|e| DatabaseError::Query(format!("disambiguator out of range: {e}")))?;
        let candidate = format_case_number(created_at, drawn);

        let mut taken = conn
            .query(
                "SELECT 1 FROM doping_cases WHERE case_number = ?1",
                [candidate.as_str()],
            )
            .await?;
        if taken.next().await?.is_none() {
            return Ok(candidate);
        }
        tracing::debug!(%candidate, "case number collision, redrawing");
    }
    Err(DatabaseError::InvalidState(format!(
        "no unused case number after {CASE_NUMBER_ATTEMPTS} draws"
    )))
}

fn to_changes<T: serde::Serialize>(detail: &T) -> Result<serde_json::Value, DatabaseError> {
    serde_json::to_value(detail).map_err(|e| DatabaseError::Other(e.into()))
}

fn validate_new_case(new_case: &NewCase) -> Result<(), CaseError> {
    if new_case.athlete_id.trim().is_empty() {
        return Err(CaseError::Validation("athlete_id is required".into()));
    }
    if new_case.alleged_violation.trim().is_empty() {
        return Err(CaseError::Validation("alleged_violation is required".into()));
    }
    if new_case.test_result.trim().is_empty() {
        return Err(CaseError::Validation("test_result is required".into()));
    }
    if matches!(new_case.lawyer_id.as_deref(), Some(id) if id.trim().is_empty()) {
        return Err(CaseError::Validation("lawyer_id must not be empty".into()));
    }
    Ok(())
}

impl CaseService {
    /// Open a stored case, decrypting its details when a blob is present.
    fn open_case(&self, stored: StoredCase) -> Result<CaseRecord, CaseError> {
        let details = stored
            .sealed
            .as_deref()
            .map(|blob| self.codec().decrypt::<CaseDetails>(blob))
            .transpose()?;
        Ok(CaseRecord {
            details,
            ..stored.record
        })
    }

    /// File a new case in status `investigation`.
    ///
    /// The case row, its `case_create` audit entry, and the athlete's
    /// `new_case` notification are written in one transaction. A lawyer actor
    /// filing without naming a lawyer is assigned to the case.
    ///
    /// # Errors
    ///
    /// - `Validation` for a missing athlete, violation, or test result.
    /// - `InvalidParty` if the athlete or lawyer reference is unknown or has
    ///   the wrong role.
    /// - `KeyUnavailable` if no case key is configured.
    /// - `StorageUnavailable` if the transaction fails.
    pub async fn create_case(
        &self,
        actor: &Actor,
        new_case: NewCase,
    ) -> Result<CaseRecord, CaseError> {
        validate_new_case(&new_case)?;

        let lawyer_id = new_case
            .lawyer_id
            .clone()
            .or_else(|| (actor.role == PartyRole::Lawyer).then(|| actor.user_id.clone()));

        let details = CaseDetails {
            test_result: new_case.test_result,
            case_summary: new_case.case_summary,
            created_by: actor.user_id.clone(),
        };
        let sealed = self.codec().encrypt(&details)?;

        let _guard = self.write_guard().await;
        let conn = self.db().conn();
        require_role(conn, &new_case.athlete_id, PartyRole::Athlete, "athlete").await?;
        if let Some(ref lawyer) = lawyer_id {
            require_role(conn, lawyer, PartyRole::Lawyer, "lawyer").await?;
        }

        let created_at = now();
        let draft = CaseRecord {
            id: String::new(),
            case_number: String::new(),
            athlete_id: new_case.athlete_id,
            lawyer_id,
            alleged_violation: new_case.alleged_violation.trim().to_string(),
            substance_name: new_case.substance_name,
            sample_date: new_case.sample_date,
            notification_date: new_case.notification_date,
            hearing_date: new_case.hearing_date,
            status: CaseStatus::Investigation,
            details: None,
            created_at,
            updated_at: created_at,
        };

        let tx = self.begin().await?;
        let result = insert_case(&tx, draft, &sealed, &actor.user_id).await;
        let record = finish(tx, result).await?;

        tracing::info!(
            case_id = %record.id,
            case_number = %record.case_number,
            athlete_id = %record.athlete_id,
            "case created"
        );
        Ok(CaseRecord {
            details: Some(details),
            ..record
        })
    }

    /// Fetch a case with decrypted details.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown ID, `CorruptPayload` or `KeyUnavailable` if
    /// the details cannot be opened.
    pub async fn get_case(&self, case_id: &str) -> Result<CaseRecord, CaseError> {
        let _guard = self.read_guard().await;
        let stored = load_case(self.db().conn(), case_id)
            .await?
            .ok_or_else(|| CaseError::not_found(ENTITY_DOPING_CASE, case_id))?;
        tracing::debug!(case_id, "case loaded");
        self.open_case(stored)
    }

    /// Cases visible to a party, newest first.
    ///
    /// Athletes see their own cases. Lawyers see cases assigned to them and
    /// every unassigned case.
    ///
    /// # Errors
    ///
    /// `Forbidden` for any other role. A single record whose details cannot
    /// be opened fails the whole listing.
    pub async fn list_cases_for_user(
        &self,
        user_id: &str,
        role: PartyRole,
    ) -> Result<Vec<CaseRecord>, CaseError> {
        let filter = match role {
            PartyRole::Athlete => "athlete_id = ?1",
            PartyRole::Lawyer => "(lawyer_id = ?1 OR lawyer_id IS NULL)",
            PartyRole::Admin | PartyRole::Federation => {
                return Err(CaseError::Forbidden(format!(
                    "role {role} has no case listing"
                )));
            }
        };

        let _guard = self.read_guard().await;
        let stored = self.stored_cases(filter, user_id).await?;
        tracing::debug!(user_id, %role, count = stored.len(), "cases listed");
        stored.into_iter().map(|s| self.open_case(s)).collect()
    }

    async fn stored_cases(
        &self,
        filter: &str,
        user_id: &str,
    ) -> Result<Vec<StoredCase>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM doping_cases WHERE {filter}
                     ORDER BY created_at DESC, rowid DESC"
                ),
                [user_id],
            )
            .await?;

        let mut cases = Vec::new();
        while let Some(row) = rows.next().await? {
            cases.push(row_to_stored(&row)?);
        }
        Ok(cases)
    }

    /// Replace the case's lawyer and record a `case_lawyer_assign` entry.
    ///
    /// The returned record does not carry details; use [`Self::get_case`].
    ///
    /// # Errors
    ///
    /// `InvalidParty` unless `lawyer_id` is a lawyer, `NotFound` for an
    /// unknown case.
    pub async fn assign_lawyer(
        &self,
        case_id: &str,
        lawyer_id: &str,
        actor_id: &str,
    ) -> Result<CaseRecord, CaseError> {
        let _guard = self.write_guard().await;
        require_role(self.db().conn(), lawyer_id, PartyRole::Lawyer, "lawyer").await?;

        let tx = self.begin().await?;
        let result = reassign_lawyer(&tx, case_id, lawyer_id, actor_id).await;
        let record = finish(tx, result)
            .await?
            .ok_or_else(|| CaseError::not_found(ENTITY_DOPING_CASE, case_id))?;

        tracing::info!(case_id, lawyer_id, actor_id, "lawyer assigned");
        Ok(record)
    }
}

async fn insert_case(
    conn: &libsql::Connection,
    draft: CaseRecord,
    sealed: &str,
    actor_id: &str,
) -> Result<CaseRecord, DatabaseError> {
    let record = CaseRecord {
        id: new_id(conn, PREFIX_CASE).await?,
        case_number: unused_case_number(conn, draft.created_at).await?,
        ..draft
    };

    conn.execute(
        &format!(
            "INSERT INTO doping_cases ({SELECT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        ),
        libsql::params![
            record.id.as_str(),
            record.case_number.as_str(),
            record.athlete_id.as_str(),
            record.lawyer_id.as_deref(),
            record.alleged_violation.as_str(),
            record.substance_name.as_deref(),
            format_date(&record.sample_date),
            record.notification_date.as_ref().map(format_date),
            record.hearing_date.as_ref().map(format_date),
            sealed,
            record.status.as_str(),
            format_datetime(&record.created_at),
            format_datetime(&record.updated_at)
        ],
    )
    .await?;

    let changes = to_changes(&CaseCreatedDetail {
        case_number: record.case_number.clone(),
        athlete_id: record.athlete_id.clone(),
        lawyer_id: record.lawyer_id.clone(),
        status: record.status,
    })?;
    insert_audit(
        conn,
        NewAuditEntry {
            actor_id,
            action: ACTION_CASE_CREATE,
            entity_type: ENTITY_DOPING_CASE,
            entity_id: &record.id,
            changes: Some(changes),
        },
        record.created_at,
    )
    .await?;

    new_case_notification(conn, &record).await?;
    Ok(record)
}

async fn reassign_lawyer(
    conn: &libsql::Connection,
    case_id: &str,
    lawyer_id: &str,
    actor_id: &str,
) -> Result<Option<CaseRecord>, DatabaseError> {
    let Some(stored) = load_case(conn, case_id).await? else {
        return Ok(None);
    };
    let old_lawyer_id = stored.record.lawyer_id.clone();
    let updated_at = now();

    conn.execute(
        "UPDATE doping_cases SET lawyer_id = ?1, updated_at = ?2 WHERE id = ?3",
        libsql::params![lawyer_id, format_datetime(&updated_at), case_id],
    )
    .await?;

    let changes = to_changes(&LawyerAssignedDetail {
        old_lawyer_id,
        new_lawyer_id: lawyer_id.to_string(),
    })?;
    insert_audit(
        conn,
        NewAuditEntry {
            actor_id,
            action: ACTION_CASE_LAWYER_ASSIGN,
            entity_type: ENTITY_DOPING_CASE,
            entity_id: case_id,
            changes: Some(changes),
        },
        updated_at,
    )
    .await?;

    Ok(Some(CaseRecord {
        lawyer_id: Some(lawyer_id.to_string()),
        updated_at,
        ..stored.record
    }))
}
