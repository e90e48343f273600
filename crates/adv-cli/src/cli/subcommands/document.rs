use clap::Subcommand;

/// Document record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DocumentCommands {
    /// Record an uploaded document against a case.
    Record {
        case_id: String,
        #[arg(long = "type")]
        document_type: String,
        #[arg(long)]
        uploaded_by: String,
    },
    /// List documents recorded for a case.
    List { case_id: String },
}
