use chrono::{DateTime, Utc};
use clap::Subcommand;

/// Video consultation record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConsultationCommands {
    /// Record a scheduled consultation against a case.
    Record {
        case_id: String,
        #[arg(long)]
        host: String,
        /// RFC 3339, e.g. 2026-05-04T09:30:00Z
        #[arg(long)]
        at: DateTime<Utc>,
    },
    /// List consultations recorded for a case.
    List { case_id: String },
}
