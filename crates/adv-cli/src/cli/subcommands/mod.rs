mod case;
mod consultation;
mod document;
mod party;

pub use case::{CaseCommands, CreateCaseArgs};
pub use consultation::ConsultationCommands;
pub use document::DocumentCommands;
pub use party::PartyCommands;
