use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    lawyer: &str,
    actor: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let case = ctx.service.assign_lawyer(id, lawyer, actor).await?;
    output(&case, flags.format)
}
