use adv_core::entities::NewCase;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CreateCaseArgs;
use crate::commands::shared::actor::resolve_actor;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    args: &CreateCaseArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = resolve_actor(ctx, &args.as_party).await?;
    let case = ctx.service.create_case(&actor, new_case(args)).await?;
    output(&case, flags.format)
}

fn new_case(args: &CreateCaseArgs) -> NewCase {
    NewCase {
        athlete_id: args.athlete.clone(),
        lawyer_id: args.lawyer.clone(),
        alleged_violation: args.violation.clone(),
        substance_name: args.substance.clone(),
        sample_date: args.sample_date,
        notification_date: args.notification_date,
        hearing_date: args.hearing_date,
        test_result: args.test_result.clone(),
        case_summary: args.summary.clone(),
    }
}
