use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    CaseCommands, ConsultationCommands, DocumentCommands, PartyCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Party registry.
    Party {
        #[command(subcommand)]
        action: PartyCommands,
    },
    /// Case records and status.
    Case {
        #[command(subcommand)]
        action: CaseCommands,
    },
    /// Document records.
    Document {
        #[command(subcommand)]
        action: DocumentCommands,
    },
    /// Video consultation records.
    Consultation {
        #[command(subcommand)]
        action: ConsultationCommands,
    },
    /// Query the audit log.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
}

/// Audit log queries.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// Full history of one entity, oldest first.
    Entity {
        entity_type: String,
        entity_id: String,
    },
    /// Filtered operator view, newest first.
    Query(AuditQueryArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuditQueryArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
    #[arg(long)]
    pub actor: Option<String>,
}
