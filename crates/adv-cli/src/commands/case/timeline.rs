use serde::Serialize;
use adv_core::entities::TimelineEvent;

use crate::cli::GlobalFlags;
use crate::commands::shared::actor::resolve_actor;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TimelineResponse {
    timeline: Vec<TimelineEvent>,
}

pub async fn run(
    id: &str,
    as_party: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let requester = resolve_actor(ctx, as_party).await?;
    let timeline = ctx.service.get_timeline(id, &requester).await?;
    output(&TimelineResponse { timeline }, flags.format)
}
