use serde::Serialize;
use adv_core::entities::Notification;
use adv_core::enums::PartyRole;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PartyCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct NotificationListResponse {
    notifications: Vec<Notification>,
}

/// Handle `adv party`.
pub async fn handle(
    action: &PartyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PartyCommands::Register {
            email,
            first_name,
            last_name,
            role,
        } => {
            let role: PartyRole = role.parse()?;
            let party = ctx
                .service
                .register_party(email, first_name, last_name, role)
                .await?;
            output(&party, flags.format)
        }
        PartyCommands::Get { id } => output(&ctx.service.get_party(id).await?, flags.format),
        PartyCommands::Notifications { id } => {
            let notifications = ctx.service.list_notifications(id).await?;
            output(&NotificationListResponse { notifications }, flags.format)
        }
    }
}
