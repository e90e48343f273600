use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    status: &str,
    actor: &str,
    notes: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let case = ctx.service.transition(id, status, actor, notes).await?;
    output(&case, flags.format)
}
