mod assign;
mod create;
mod list;
mod status;
mod timeline;

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CaseCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `adv case`.
pub async fn handle(
    action: &CaseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if action.needs_case_key() {
        ctx.config
            .require_crypto()
            .context("set crypto.key or ADVOCATE_CRYPTO__KEY to read or file case details")?;
    }

    match action {
        CaseCommands::Create(args) => create::run(args, ctx, flags).await,
        CaseCommands::Get { id } => output(&ctx.service.get_case(id).await?, flags.format),
        CaseCommands::List { as_party } => list::run(as_party, ctx, flags).await,
        CaseCommands::Status {
            id,
            status,
            actor,
            notes,
        } => status::run(id, status, actor, notes.as_deref(), ctx, flags).await,
        CaseCommands::Assign { id, lawyer, actor } => {
            assign::run(id, lawyer, actor, ctx, flags).await
        }
        CaseCommands::Timeline { id, as_party } => timeline::run(id, as_party, ctx, flags).await,
    }
}
