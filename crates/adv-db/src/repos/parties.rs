//! Party registry: athletes, lawyers, admins, and federation officers.

use adv_core::entities::Party;
use adv_core::enums::PartyRole;
use adv_core::errors::CaseError;
use adv_core::ids::PREFIX_PARTY;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, now, parse_datetime, parse_enum};
use crate::new_id;
use crate::service::CaseService;

const SELECT_COLS: &str = "id, email, first_name, last_name, user_type, created_at";

fn row_to_party(row: &libsql::Row) -> Result<Party, DatabaseError> {
    Ok(Party {
        id: row.get::<String>(0)?,
        email: row.get::<String>(1)?,
        first_name: row.get::<String>(2)?,
        last_name: row.get::<String>(3)?,
        role: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Look up a party's role on `conn`. `None` if the party does not exist.
pub(crate) async fn party_role(
    conn: &libsql::Connection,
    party_id: &str,
) -> Result<Option<PartyRole>, DatabaseError> {
    let mut rows = conn
        .query("SELECT user_type FROM users WHERE id = ?1", [party_id])
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(parse_enum(&row.get::<String>(0)?)?)),
        None => Ok(None),
    }
}

/// Require `party_id` to exist with `role`.
///
/// `field` names the reference in the error message (`athlete`, `lawyer`).
pub(crate) async fn require_role(
    conn: &libsql::Connection,
    party_id: &str,
    role: PartyRole,
    field: &str,
) -> Result<(), CaseError> {
    match party_role(conn, party_id).await? {
        Some(found) if found == role => Ok(()),
        Some(found) => Err(CaseError::InvalidParty(format!(
            "{field} {party_id} has role {found}, expected {role}"
        ))),
        None => Err(CaseError::InvalidParty(format!(
            "{field} {party_id} does not exist"
        ))),
    }
}

async fn email_taken(conn: &libsql::Connection, email: &str) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query("SELECT 1 FROM users WHERE email = ?1", [email])
        .await?;
    Ok(rows.next().await?.is_some())
}

impl CaseService {
    /// Register a party.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed email, an empty name, or an email that is
    /// already registered.
    pub async fn register_party(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        role: PartyRole,
    ) -> Result<Party, CaseError> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(CaseError::Validation(format!("invalid email '{email}'")));
        }
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(CaseError::Validation("first and last name are required".into()));
        }

        let _guard = self.write_guard().await;
        let conn = self.db().conn();
        if email_taken(conn, &email).await? {
            return Err(CaseError::Validation(format!(
                "email '{email}' is already registered"
            )));
        }

        let party = Party {
            id: new_id(conn, PREFIX_PARTY).await?,
            email,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            role,
            created_at: now(),
        };
        self.insert_party(&party).await?;

        tracing::info!(party_id = %party.id, role = %party.role, "party registered");
        Ok(party)
    }

    async fn insert_party(&self, party: &Party) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO users (id, email, first_name, last_name, user_type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    party.id.as_str(),
                    party.email.as_str(),
                    party.first_name.as_str(),
                    party.last_name.as_str(),
                    party.role.as_str(),
                    format_datetime(&party.created_at)
                ],
            )
            .await?;
        Ok(())
    }

    /// Fetch a party by ID.
    ///
    /// # Errors
    ///
    /// `NotFound` if no party has this ID.
    pub async fn get_party(&self, party_id: &str) -> Result<Party, CaseError> {
        let _guard = self.read_guard().await;
        self.find_party(party_id)
            .await?
            .ok_or_else(|| CaseError::not_found("user", party_id))
    }

    async fn find_party(&self, party_id: &str) -> Result<Option<Party>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"),
                [party_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_party(&row)?)),
            None => Ok(None),
        }
    }
}
