//! Document and video consultation records.
//!
//! Metadata rows only. They exist so the timeline has producers to read; no
//! file contents or meeting scheduling live here.

use chrono::{DateTime, SubsecRound, Utc};

use adv_core::entities::{LegalDocument, VideoConsultation};
use adv_core::errors::CaseError;
use adv_core::ids::{ENTITY_DOPING_CASE, PREFIX_CONSULTATION, PREFIX_DOCUMENT};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, now, parse_datetime};
use crate::new_id;
use crate::repos::parties::party_role;
use crate::service::CaseService;

async fn case_exists(conn: &libsql::Connection, case_id: &str) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query("SELECT 1 FROM doping_cases WHERE id = ?1", [case_id])
        .await?;
    Ok(rows.next().await?.is_some())
}

fn row_to_document(row: &libsql::Row) -> Result<LegalDocument, DatabaseError> {
    Ok(LegalDocument {
        id: row.get::<String>(0)?,
        case_id: row.get::<String>(1)?,
        document_type: row.get::<String>(2)?,
        uploaded_by: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_consultation(row: &libsql::Row) -> Result<VideoConsultation, DatabaseError> {
    Ok(VideoConsultation {
        id: row.get::<String>(0)?,
        case_id: row.get::<String>(1)?,
        host_id: row.get::<String>(2)?,
        scheduled_time: parse_datetime(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl CaseService {
    /// Check that a case exists and a party is registered, under the write lock.
    async fn require_case_and_party(&self, case_id: &str, party_id: &str) -> Result<(), CaseError> {
        let conn = self.db().conn();
        if !case_exists(conn, case_id).await? {
            return Err(CaseError::not_found(ENTITY_DOPING_CASE, case_id));
        }
        if party_role(conn, party_id).await?.is_none() {
            return Err(CaseError::InvalidParty(format!(
                "party {party_id} does not exist"
            )));
        }
        Ok(())
    }

    /// Record that a document of `document_type` was uploaded to a case.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty type, `NotFound` for an unknown case,
    /// `InvalidParty` for an unknown uploader.
    pub async fn record_document(
        &self,
        case_id: &str,
        document_type: &str,
        uploaded_by: &str,
    ) -> Result<LegalDocument, CaseError> {
        let document_type = document_type.trim();
        if document_type.is_empty() {
            return Err(CaseError::Validation("document_type is required".into()));
        }

        let _guard = self.write_guard().await;
        self.require_case_and_party(case_id, uploaded_by).await?;

        let conn = self.db().conn();
        let document = LegalDocument {
            id: new_id(conn, PREFIX_DOCUMENT).await?,
            case_id: case_id.to_string(),
            document_type: document_type.to_string(),
            uploaded_by: uploaded_by.to_string(),
            created_at: now(),
        };
        conn.execute(
            "INSERT INTO legal_documents (id, case_id, document_type, uploaded_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                document.id.as_str(),
                document.case_id.as_str(),
                document.document_type.as_str(),
                document.uploaded_by.as_str(),
                format_datetime(&document.created_at)
            ],
        )
        .await
        .map_err(DatabaseError::from)?;

        tracing::info!(case_id, document_id = %document.id, "document recorded");
        Ok(document)
    }

    /// Record a video consultation scheduled for `scheduled_time`.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown case, `InvalidParty` for an unknown host.
    pub async fn record_consultation(
        &self,
        case_id: &str,
        host_id: &str,
        scheduled_time: DateTime<Utc>,
    ) -> Result<VideoConsultation, CaseError> {
        let _guard = self.write_guard().await;
        self.require_case_and_party(case_id, host_id).await?;

        let conn = self.db().conn();
        let consultation = VideoConsultation {
            id: new_id(conn, PREFIX_CONSULTATION).await?,
            case_id: case_id.to_string(),
            host_id: host_id.to_string(),
            scheduled_time: scheduled_time.trunc_subsecs(6),
            created_at: now(),
        };
        conn.execute(
            "INSERT INTO video_consultations (id, case_id, host_id, scheduled_time, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                consultation.id.as_str(),
                consultation.case_id.as_str(),
                consultation.host_id.as_str(),
                format_datetime(&consultation.scheduled_time),
                format_datetime(&consultation.created_at)
            ],
        )
        .await
        .map_err(DatabaseError::from)?;

        tracing::info!(case_id, consultation_id = %consultation.id, "consultation recorded");
        Ok(consultation)
    }

    /// Documents recorded for a case, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the query fails.
    pub async fn list_documents(&self, case_id: &str) -> Result<Vec<LegalDocument>, CaseError> {
        let _guard = self.read_guard().await;
        Ok(self.documents_for(case_id).await?)
    }

    pub(crate) async fn documents_for(
        &self,
        case_id: &str,
    ) -> Result<Vec<LegalDocument>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, case_id, document_type, uploaded_by, created_at
                 FROM legal_documents WHERE case_id = ?1 ORDER BY created_at ASC, rowid ASC",
                [case_id],
            )
            .await?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next().await? {
            documents.push(row_to_document(&row)?);
        }
        Ok(documents)
    }

    /// Consultations recorded for a case, in the order they were recorded.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the query fails.
    pub async fn list_consultations(
        &self,
        case_id: &str,
    ) -> Result<Vec<VideoConsultation>, CaseError> {
        let _guard = self.read_guard().await;
        Ok(self.consultations_for(case_id).await?)
    }

    pub(crate) async fn consultations_for(
        &self,
        case_id: &str,
    ) -> Result<Vec<VideoConsultation>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, case_id, host_id, scheduled_time, created_at
                 FROM video_consultations WHERE case_id = ?1 ORDER BY rowid ASC",
                [case_id],
            )
            .await?;
        let mut consultations = Vec::new();
        while let Some(row) = rows.next().await? {
            consultations.push(row_to_consultation(&row)?);
        }
        Ok(consultations)
    }
}
