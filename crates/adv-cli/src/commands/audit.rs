use serde::Serialize;
use adv_core::entities::AuditEntry;
use adv_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{AuditCommands, AuditQueryArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuditResponse {
    entries: Vec<AuditEntry>,
}

/// Handle `adv audit`.
pub async fn handle(
    action: &AuditCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entries = match action {
        AuditCommands::Entity {
            entity_type,
            entity_id,
        } => {
            ctx.service
                .query_audit_by_entity(entity_type, entity_id)
                .await?
        }
        AuditCommands::Query(args) => {
            let filter = build_filter(args, flags.limit.unwrap_or(ctx.config.general.default_limit));
            ctx.service.query_audit(&filter).await?
        }
    };
    output(&AuditResponse { entries }, flags.format)
}

fn build_filter(args: &AuditQueryArgs, limit: u32) -> AuditFilter {
    AuditFilter {
        entity_type: args.entity_type.clone(),
        entity_id: args.entity_id.clone(),
        action: args.action.clone(),
        actor_id: args.actor.clone(),
        limit: Some(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::build_filter;
    use crate::cli::root_commands::AuditQueryArgs;

    #[test]
    fn filter_carries_every_field() {
        let args = AuditQueryArgs {
            entity_type: Some("doping_case".into()),
            entity_id: None,
            action: Some("case_status_update".into()),
            actor: Some("usr-1".into()),
        };
        let filter = build_filter(&args, 7);
        assert_eq!(filter.entity_type.as_deref(), Some("doping_case"));
        assert_eq!(filter.entity_id, None);
        assert_eq!(filter.action.as_deref(), Some("case_status_update"));
        assert_eq!(filter.actor_id.as_deref(), Some("usr-1"));
        assert_eq!(filter.limit, Some(7));
    }
}
