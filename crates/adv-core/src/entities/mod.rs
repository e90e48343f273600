//! Entity structs for all Advocate domain objects.
//!
//! Persistent entities map to a table in the libSQL schema
//! (`adv-db/migrations`). `TimelineEvent` is derived on demand and never
//! stored. All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod audit;
mod case;
mod consultation;
mod document;
mod notification;
mod party;
mod timeline;

pub use audit::AuditEntry;
pub use case::{CaseDetails, CaseRecord, NewCase};
pub use consultation::VideoConsultation;
pub use document::LegalDocument;
pub use notification::Notification;
pub use party::Party;
pub use timeline::TimelineEvent;
