use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Party { action } => commands::party::handle(&action, ctx, flags).await,
        Commands::Case { action } => commands::case::handle(&action, ctx, flags).await,
        Commands::Document { action } => commands::document::handle(&action, ctx, flags).await,
        Commands::Consultation { action } => {
            commands::consultation::handle(&action, ctx, flags).await
        }
        Commands::Audit { action } => commands::audit::handle(&action, ctx, flags).await,
    }
}
