use serde::Serialize;
use adv_core::entities::CaseRecord;

use crate::cli::GlobalFlags;
use crate::commands::shared::actor::resolve_actor;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CaseListResponse {
    cases: Vec<CaseRecord>,
}

pub async fn run(as_party: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = resolve_actor(ctx, as_party).await?;
    let mut cases = ctx
        .service
        .list_cases_for_user(&actor.user_id, actor.role)
        .await?;
    cases.truncate(effective_limit(flags.limit, ctx.config.general.default_limit));
    output(&CaseListResponse { cases }, flags.format)
}
