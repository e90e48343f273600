use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Case record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CaseCommands {
    /// File a new case.
    Create(CreateCaseArgs),
    /// Get a case by ID, with decrypted details.
    Get { id: String },
    /// List cases visible to a party.
    List {
        /// Party whose view to list (role comes from the registry)
        #[arg(long = "as")]
        as_party: String,
    },
    /// Move a case to a new status.
    Status {
        id: String,
        /// investigation, charged, hearing, appeal, resolved, or dismissed
        status: String,
        #[arg(long)]
        actor: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Assign a lawyer to a case.
    Assign {
        id: String,
        lawyer: String,
        #[arg(long)]
        actor: String,
    },
    /// Merged timeline of a case, most recent first.
    Timeline {
        id: String,
        /// Requesting party (role comes from the registry)
        #[arg(long = "as")]
        as_party: String,
    },
}

impl CaseCommands {
    /// Whether the command seals or opens case details.
    #[must_use]
    pub const fn needs_case_key(&self) -> bool {
        matches!(self, Self::Create(_) | Self::Get { .. } | Self::List { .. })
    }
}

#[derive(Clone, Debug, Args)]
pub struct CreateCaseArgs {
    /// Filing party (role comes from the registry)
    #[arg(long = "as")]
    pub as_party: String,
    #[arg(long)]
    pub athlete: String,
    #[arg(long)]
    pub lawyer: Option<String>,
    #[arg(long)]
    pub violation: String,
    #[arg(long)]
    pub substance: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub sample_date: NaiveDate,
    /// YYYY-MM-DD
    #[arg(long)]
    pub notification_date: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub hearing_date: Option<NaiveDate>,
    #[arg(long)]
    pub test_result: String,
    #[arg(long)]
    pub summary: Option<String>,
}
