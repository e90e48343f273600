//! Status Machine: validated status transitions with their audit entries.
//!
//! Every member of [`CaseStatus`] is reachable from every other. The only
//! rejection is a target outside the set, which fails before storage is
//! touched.

use adv_core::audit_detail::StatusChangedDetail;
use adv_core::entities::CaseRecord;
use adv_core::enums::CaseStatus;
use adv_core::errors::CaseError;
use adv_core::ids::{ACTION_CASE_STATUS_UPDATE, ENTITY_DOPING_CASE};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, now};
use crate::repos::audit::{NewAuditEntry, insert_audit};
use crate::repos::cases::load_case;
use crate::service::{CaseService, finish};

impl CaseService {
    /// Move a case to `new_status` and append a `case_status_update` entry.
    ///
    /// The update and the audit entry commit together or not at all. The
    /// returned record does not carry details; use [`Self::get_case`].
    ///
    /// # Errors
    ///
    /// - `InvalidStatus` if `new_status` is not a known status. Nothing is written.
    /// - `NotFound` for an unknown case.
    /// - `StorageUnavailable` if the transaction fails.
    pub async fn transition(
        &self,
        case_id: &str,
        new_status: &str,
        actor_id: &str,
        notes: Option<&str>,
    ) -> Result<CaseRecord, CaseError> {
        let next: CaseStatus = new_status.parse()?;

        let _guard = self.write_guard().await;
        let tx = self.begin().await?;
        let result = apply_transition(&tx, case_id, next, actor_id, notes).await;
        let (old, updated) = finish(tx, result)
            .await?
            .ok_or_else(|| CaseError::not_found(ENTITY_DOPING_CASE, case_id))?;

        tracing::info!(
            case_id,
            actor_id,
            old_status = %old,
            new_status = %updated.status,
            "case status changed"
        );
        Ok(updated)
    }
}

/// Conditional update plus audit entry. `None` if the case does not exist.
async fn apply_transition(
    conn: &libsql::Connection,
    case_id: &str,
    next: CaseStatus,
    actor_id: &str,
    notes: Option<&str>,
) -> Result<Option<(CaseStatus, CaseRecord)>, DatabaseError> {
    let Some(stored) = load_case(conn, case_id).await? else {
        return Ok(None);
    };
    let current = stored.record.status;
    let updated_at = now();

    let changed = conn
        .execute(
            "UPDATE doping_cases SET case_status = ?1, updated_at = ?2
             WHERE id = ?3 AND case_status = ?4",
            libsql::params![
                next.as_str(),
                format_datetime(&updated_at),
                case_id,
                current.as_str()
            ],
        )
        .await?;
    if changed != 1 {
        return Err(DatabaseError::InvalidState(format!(
            "case {case_id} left status {current} during transition"
        )));
    }

    let detail = StatusChangedDetail {
        old_status: current,
        new_status: next,
        notes: notes.map(str::to_string),
    };
    let changes = serde_json::to_value(&detail).map_err(|e| DatabaseError::Other(e.into()))?;
    insert_audit(
        conn,
        NewAuditEntry {
            actor_id,
            action: ACTION_CASE_STATUS_UPDATE,
            entity_type: ENTITY_DOPING_CASE,
            entity_id: case_id,
            changes: Some(changes),
        },
        updated_at,
    )
    .await?;

    Ok(Some((
        current,
        CaseRecord {
            status: next,
            updated_at,
            ..stored.record
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_case, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn transition_updates_status_and_audits() {
        let svc = test_service().await;
        let case = create_test_case(&svc).await;

        let updated = svc
            .transition(&case.id, "charged", "usr-lawyer", Some("B-sample confirmed"))
            .await
            .unwrap();
        assert_eq!(updated.status, CaseStatus::Charged);
        assert_eq!(updated.details, None);

        let fetched = svc.get_case(&case.id).await.unwrap();
        assert_eq!(fetched.status, CaseStatus::Charged);
        assert_eq!(fetched.updated_at, updated.updated_at);

        let entries = svc
            .query_audit_by_entity(ENTITY_DOPING_CASE, &case.id)
            .await
            .unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.action, ACTION_CASE_STATUS_UPDATE);
        assert_eq!(last.actor_id, "usr-lawyer");
        let detail: StatusChangedDetail =
            serde_json::from_value(last.changes.clone().unwrap()).unwrap();
        assert_eq!(
            detail,
            StatusChangedDetail {
                old_status: CaseStatus::Investigation,
                new_status: CaseStatus::Charged,
                notes: Some("B-sample confirmed".into()),
            }
        );
    }

    #[tokio::test]
    async fn unknown_status_leaves_record_untouched() {
        let svc = test_service().await;
        let case = create_test_case(&svc).await;
        let before = svc.get_case(&case.id).await.unwrap();

        for bad in ["closed", "", "Charged", " hearing"] {
            let err = svc.transition(&case.id, bad, "usr-1", None).await.unwrap_err();
            assert_eq!(err, CaseError::InvalidStatus(bad.to_string()));
        }

        assert_eq!(svc.get_case(&case.id).await.unwrap(), before);
        let entries = svc
            .query_audit_by_entity(ENTITY_DOPING_CASE, &case.id)
            .await
            .unwrap();
        assert!(entries.iter().all(|e| e.action != ACTION_CASE_STATUS_UPDATE));
    }

    #[tokio::test]
    async fn unknown_case_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .transition("cas-00000000", "hearing", "usr-1", None)
            .await
            .unwrap_err();
        assert_eq!(err, CaseError::not_found(ENTITY_DOPING_CASE, "cas-00000000"));
    }

    #[tokio::test]
    async fn any_state_reaches_any_state() {
        let svc = test_service().await;
        let case = create_test_case(&svc).await;

        let path = ["resolved", "investigation", "appeal", "appeal", "dismissed", "hearing"];
        for target in path {
            let updated = svc.transition(&case.id, target, "usr-1", None).await.unwrap();
            assert_eq!(updated.status.as_str(), target);
        }

        let changes: Vec<StatusChangedDetail> = svc
            .query_audit_by_entity(ENTITY_DOPING_CASE, &case.id)
            .await
            .unwrap()
            .into_iter()
            .filter(|e| e.action == ACTION_CASE_STATUS_UPDATE)
            .map(|e| serde_json::from_value(e.changes.unwrap()).unwrap())
            .collect();
        assert_eq!(changes.len(), path.len());
        assert_eq!(changes[0].old_status, CaseStatus::Investigation);
        for pair in changes.windows(2) {
            assert_eq!(pair[1].old_status, pair[0].new_status);
        }
    }
}
