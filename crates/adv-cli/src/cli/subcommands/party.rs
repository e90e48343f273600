use clap::Subcommand;

/// Party registry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PartyCommands {
    /// Register a party.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// athlete, lawyer, admin, or federation
        #[arg(long)]
        role: String,
    },
    /// Get a party by ID.
    Get { id: String },
    /// List notifications addressed to a party.
    Notifications { id: String },
}
