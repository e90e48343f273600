//! Timeline Aggregator: a read-only merged view over a case's history.
//!
//! Three producers feed the view: document records, status-change audit
//! entries, and consultation records. Nothing here is persisted.

use std::cmp::Ordering;

use adv_core::entities::TimelineEvent;
use adv_core::enums::TimelineEventType;
use adv_core::errors::CaseError;
use adv_core::identity::Actor;
use adv_core::ids::{ACTION_CASE_STATUS_UPDATE, ENTITY_DOPING_CASE};

use crate::repos::cases::load_case;
use crate::service::CaseService;

/// Merge producer outputs into one list, most recent first.
///
/// Each inner list must be in insertion order. Events with equal timestamps
/// are ordered by [`TimelineEventType`] (status changes first), then later
/// insertion first within one producer.
#[must_use]
pub fn merge_timeline(producers: Vec<Vec<TimelineEvent>>) -> Vec<TimelineEvent> {
    let mut ranked: Vec<(usize, TimelineEvent)> = producers
        .into_iter()
        .flat_map(|events| events.into_iter().enumerate())
        .collect();

    ranked.sort_by(|(a_ord, a), (b_ord, b)| {
        compare_events(a, b).then_with(|| b_ord.cmp(a_ord))
    });
    ranked.into_iter().map(|(_, event)| event).collect()
}

/// Timeline order ignoring insertion: newest first, then by source priority.
#[must_use]
pub fn compare_events(a: &TimelineEvent, b: &TimelineEvent) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| a.event_type.cmp(&b.event_type))
}

impl CaseService {
    /// Merged history of a case, most recent first.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown case.
    /// - `Forbidden` when an athlete asks for another athlete's case.
    /// - Any producer failure fails the whole call.
    pub async fn get_timeline(
        &self,
        case_id: &str,
        requester: &Actor,
    ) -> Result<Vec<TimelineEvent>, CaseError> {
        let _guard = self.read_guard().await;
        let case = load_case(self.db().conn(), case_id)
            .await?
            .ok_or_else(|| CaseError::not_found(ENTITY_DOPING_CASE, case_id))?
            .record;

        if requester.is_athlete() && case.athlete_id != requester.user_id {
            tracing::warn!(
                case_id,
                requester = %requester.user_id,
                "athlete requested another athlete's timeline"
            );
            return Err(CaseError::Forbidden(format!(
                "case {case_id} belongs to another athlete"
            )));
        }

        let documents: Vec<TimelineEvent> = self
            .documents_for(case_id)
            .await?
            .into_iter()
            .map(|doc| TimelineEvent {
                event_type: TimelineEventType::DocumentUpload,
                timestamp: doc.created_at,
                description: format!("Document: {}", doc.document_type),
                actor_id: doc.uploaded_by,
            })
            .collect();

        let status_changes: Vec<TimelineEvent> = self
            .audit_for_entity(ENTITY_DOPING_CASE, case_id, Some(ACTION_CASE_STATUS_UPDATE))
            .await?
            .into_iter()
            .map(|entry| TimelineEvent {
                event_type: TimelineEventType::StatusChange,
                timestamp: entry.created_at,
                description: format!("Status changed: {}", entry.action),
                actor_id: entry.actor_id,
            })
            .collect();

        let consultations: Vec<TimelineEvent> = self
            .consultations_for(case_id)
            .await?
            .into_iter()
            .map(|vc| TimelineEvent {
                event_type: TimelineEventType::Consultation,
                timestamp: vc.scheduled_time,
                description: "Video consultation scheduled".to_string(),
                actor_id: vc.host_id,
            })
            .collect();

        let timeline = merge_timeline(vec![status_changes, documents, consultations]);
        tracing::debug!(case_id, events = timeline.len(), "timeline built");
        Ok(timeline)
    }
}
