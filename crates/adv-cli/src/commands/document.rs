use serde::Serialize;
use adv_core::entities::LegalDocument;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocumentCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DocumentListResponse {
    documents: Vec<LegalDocument>,
}

/// Handle `adv document`.
pub async fn handle(
    action: &DocumentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DocumentCommands::Record {
            case_id,
            document_type,
            uploaded_by,
        } => {
            let document = ctx
                .service
                .record_document(case_id, document_type, uploaded_by)
                .await?;
            output(&document, flags.format)
        }
        DocumentCommands::List { case_id } => {
            let documents = ctx.service.list_documents(case_id).await?;
            output(&DocumentListResponse { documents }, flags.format)
        }
    }
}
