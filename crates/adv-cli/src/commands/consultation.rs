use serde::Serialize;
use adv_core::entities::VideoConsultation;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConsultationCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ConsultationListResponse {
    consultations: Vec<VideoConsultation>,
}

/// Handle `adv consultation`.
pub async fn handle(
    action: &ConsultationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ConsultationCommands::Record { case_id, host, at } => {
            let consultation = ctx.service.record_consultation(case_id, host, *at).await?;
            output(&consultation, flags.format)
        }
        ConsultationCommands::List { case_id } => {
            let consultations = ctx.service.list_consultations(case_id).await?;
            output(&ConsultationListResponse { consultations }, flags.format)
        }
    }
}
