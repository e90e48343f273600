//! Notification records. Rows are persisted only; delivery happens elsewhere.

use adv_core::entities::{CaseRecord, Notification};
use adv_core::errors::CaseError;
use adv_core::ids::{ENTITY_DOPING_CASE, PREFIX_NOTIFICATION};

use crate::error::DatabaseError;
use crate::helpers::{format_date, format_datetime, get_opt_string, parse_datetime};
use crate::new_id;
use crate::service::CaseService;

const SELECT_COLS: &str = "id, user_id, notification_type, title, message, priority, \
     related_entity_type, related_entity_id, created_at";

fn row_to_notification(row: &libsql::Row) -> Result<Notification, DatabaseError> {
    Ok(Notification {
        id: row.get::<String>(0)?,
        user_id: row.get::<String>(1)?,
        notification_type: row.get::<String>(2)?,
        title: row.get::<String>(3)?,
        message: row.get::<String>(4)?,
        priority: row.get::<String>(5)?,
        related_entity_type: get_opt_string(row, 6)?,
        related_entity_id: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Tell the athlete a case was filed against their sample.
///
/// Runs inside the case creation transaction.
pub(crate) async fn new_case_notification(
    conn: &libsql::Connection,
    case: &CaseRecord,
) -> Result<Notification, DatabaseError> {
    let notification = Notification {
        id: new_id(conn, PREFIX_NOTIFICATION).await?,
        user_id: case.athlete_id.clone(),
        notification_type: "new_case".into(),
        title: "New Doping Case Filed".into(),
        message: format!(
            "A new doping case has been filed regarding your sample from {}.",
            format_date(&case.sample_date)
        ),
        priority: "high".into(),
        related_entity_type: Some(ENTITY_DOPING_CASE.into()),
        related_entity_id: Some(case.id.clone()),
        created_at: case.created_at,
    };

    conn.execute(
        &format!(
            "INSERT INTO notifications ({SELECT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        ),
        libsql::params![
            notification.id.as_str(),
            notification.user_id.as_str(),
            notification.notification_type.as_str(),
            notification.title.as_str(),
            notification.message.as_str(),
            notification.priority.as_str(),
            notification.related_entity_type.as_deref(),
            notification.related_entity_id.as_deref(),
            format_datetime(&notification.created_at)
        ],
    )
    .await?;

    Ok(notification)
}

impl CaseService {
    /// Notifications addressed to a party, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the query fails.
    pub async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>, CaseError> {
        let _guard = self.read_guard().await;
        Ok(self.notifications_for(user_id).await?)
    }

    async fn notifications_for(&self, user_id: &str) -> Result<Vec<Notification>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM notifications WHERE user_id = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                [user_id],
            )
            .await?;

        let mut notifications = Vec::new();
        while let Some(row) = rows.next().await? {
            notifications.push(row_to_notification(&row)?);
        }
        Ok(notifications)
    }
}
