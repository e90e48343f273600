//! Repository modules implementing the case lifecycle operations.
//!
//! Each module adds methods to `CaseService` via `impl CaseService` blocks.

pub mod audit;
pub mod cases;
pub mod notifications;
pub mod parties;
pub mod sources;
pub mod status;
pub mod timeline;
