//! Audit log repository.
//!
//! Append-only entries recording every state-changing action. Storage
//! triggers reject UPDATE and DELETE; this module only ever inserts and reads.

use chrono::{DateTime, Utc};
use serde_json::Value;

use adv_core::entities::AuditEntry;
use adv_core::errors::CaseError;
use adv_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, now, parse_datetime, parse_optional_json};
use crate::new_id;
use crate::service::CaseService;

const SELECT_COLS: &str = "seq, id, user_id, action, entity_type, entity_id, changes, created_at";

/// Filter criteria for operator audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub action: Option<String>,
    pub actor_id: Option<String>,
    pub limit: Option<u32>,
}

/// An audit entry before storage assigns `seq`, `id`, and `created_at`.
#[derive(Debug, Clone)]
pub struct NewAuditEntry<'a> {
    pub actor_id: &'a str,
    pub action: &'a str,
    pub entity_type: &'a str,
    pub entity_id: &'a str,
    pub changes: Option<Value>,
}

fn row_to_audit(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        seq: row.get::<i64>(0)?,
        id: row.get::<String>(1)?,
        actor_id: row.get::<String>(2)?,
        action: row.get::<String>(3)?,
        entity_type: row.get::<String>(4)?,
        entity_id: row.get::<String>(5)?,
        changes: parse_optional_json(get_opt_string(row, 6)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Insert one entry on `conn`, which may be an open transaction.
///
/// Callers must hold the service write lock so that `last_insert_rowid`
/// belongs to this insert.
pub(crate) async fn insert_audit(
    conn: &libsql::Connection,
    entry: NewAuditEntry<'_>,
    at: DateTime<Utc>,
) -> Result<AuditEntry, DatabaseError> {
    let id = new_id(conn, PREFIX_AUDIT).await?;
    let changes = entry.changes.as_ref().map(Value::to_string);

    conn.execute(
        "INSERT INTO audit_logs (id, user_id, action, entity_type, entity_id, changes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            id.as_str(),
            entry.actor_id,
            entry.action,
            entry.entity_type,
            entry.entity_id,
            changes.as_deref(),
            format_datetime(&at)
        ],
    )
    .await?;

    Ok(AuditEntry {
        seq: conn.last_insert_rowid(),
        id,
        actor_id: entry.actor_id.to_string(),
        action: entry.action.to_string(),
        entity_type: entry.entity_type.to_string(),
        entity_id: entry.entity_id.to_string(),
        changes: entry.changes,
        created_at: at,
    })
}

impl CaseService {
    /// Append an audit entry outside of any other mutation.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty actor, action, entity type or entity ID;
    /// otherwise only `StorageUnavailable`.
    pub async fn append_audit(
        &self,
        actor_id: &str,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        changes: Option<Value>,
    ) -> Result<AuditEntry, CaseError> {
        for (field, value) in [
            ("actor_id", actor_id),
            ("action", action),
            ("entity_type", entity_type),
            ("entity_id", entity_id),
        ] {
            if value.trim().is_empty() {
                return Err(CaseError::Validation(format!("{field} must not be empty")));
            }
        }

        let _guard = self.write_guard().await;
        let entry = insert_audit(
            self.db().conn(),
            NewAuditEntry {
                actor_id,
                action,
                entity_type,
                entity_id,
                changes,
            },
            now(),
        )
        .await?;
        Ok(entry)
    }

    /// All entries for one entity, oldest first; equal timestamps keep
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the query fails.
    pub async fn query_audit_by_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditEntry>, CaseError> {
        let _guard = self.read_guard().await;
        Ok(self.audit_for_entity(entity_type, entity_id, None).await?)
    }

    pub(crate) async fn audit_for_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
        action: Option<&str>,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM audit_logs
                     WHERE entity_type = ?1 AND entity_id = ?2 AND (?3 IS NULL OR action = ?3)
                     ORDER BY created_at ASC, seq ASC"
                ),
                libsql::params![entity_type, entity_id, action],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_audit(&row)?);
        }
        Ok(entries)
    }

    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the query fails.
    pub async fn query_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, CaseError> {
        let _guard = self.read_guard().await;
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref et) = filter.entity_type {
            params.push(libsql::Value::Text(et.clone()));
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(libsql::Value::Text(eid.clone()));
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(ref action) = filter.action {
            params.push(libsql::Value::Text(action.clone()));
            conditions.push(format!("action = ?{}", params.len()));
        }
        if let Some(ref actor) = filter.actor_id {
            params.push(libsql::Value::Text(actor.clone()));
            conditions.push(format!("user_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM audit_logs {where_clause}
             ORDER BY created_at DESC, seq DESC LIMIT {limit}"
        );

        let entries = self.collect_audit(&sql, params).await?;
        Ok(entries)
    }

    async fn collect_audit(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_audit(&row)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn append_and_query_by_entity() {
        let svc = test_service().await;

        for i in 0..3 {
            svc.append_audit(
                "usr-00000001",
                "case_note_add",
                "doping_case",
                "cas-00000001",
                Some(json!({ "n": i })),
            )
            .await
            .unwrap();
        }
        svc.append_audit("usr-00000001", "case_note_add", "doping_case", "cas-00000002", None)
            .await
            .unwrap();

        let entries = svc
            .query_audit_by_entity("doping_case", "cas-00000001")
            .await
            .unwrap();
        assert_eq!(entries.len(), 3);
        let ns: Vec<i64> = entries
            .iter()
            .map(|e| e.changes.as_ref().unwrap()["n"].as_i64().unwrap())
            .collect();
        assert_eq!(ns, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn identical_timestamps_keep_insertion_order() {
        let svc = test_service().await;
        let at = now();

        let mut seqs = Vec::new();
        for action in ["first", "second", "third"] {
            let entry = insert_audit(
                svc.db().conn(),
                NewAuditEntry {
                    actor_id: "usr-1",
                    action,
                    entity_type: "doping_case",
                    entity_id: "cas-tie",
                    changes: None,
                },
                at,
            )
            .await
            .unwrap();
            seqs.push(entry.seq);
        }
        assert!(seqs.windows(2).all(|w| w[0] < w[1]));

        let entries = svc.query_audit_by_entity("doping_case", "cas-tie").await.unwrap();
        let actions: Vec<&str> = entries.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["first", "second", "third"]);
        assert!(entries.iter().all(|e| e.created_at == at));
    }

    #[tokio::test]
    async fn append_returns_stored_entry() {
        let svc = test_service().await;
        let appended = svc
            .append_audit("usr-1", "user_create", "user", "usr-2", Some(json!({"email": "x@y.z"})))
            .await
            .unwrap();

        assert!(appended.id.starts_with("aud-"));
        let stored = svc.query_audit_by_entity("user", "usr-2").await.unwrap();
        assert_eq!(stored, vec![appended]);
    }

    #[tokio::test]
    async fn empty_fields_are_rejected() {
        let svc = test_service().await;
        let result = svc.append_audit("usr-1", " ", "doping_case", "cas-1", None).await;
        assert!(matches!(result, Err(CaseError::Validation(_))));
        assert!(svc.query_audit(&AuditFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn filter_by_action_and_actor() {
        let svc = test_service().await;
        svc.append_audit("usr-a", "case_create", "doping_case", "cas-1", None)
            .await
            .unwrap();
        svc.append_audit("usr-b", "case_status_update", "doping_case", "cas-1", None)
            .await
            .unwrap();
        svc.append_audit("usr-a", "case_status_update", "doping_case", "cas-1", None)
            .await
            .unwrap();

        let by_action = svc
            .query_audit(&AuditFilter {
                action: Some("case_status_update".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_action.len(), 2);
        assert_eq!(by_action[0].actor_id, "usr-a", "newest first");

        let by_both = svc
            .query_audit(&AuditFilter {
                action: Some("case_status_update".into()),
                actor_id: Some("usr-b".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_both.len(), 1);

        let limited = svc
            .query_audit(&AuditFilter {
                limit: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
    }
}
