use anyhow::Context;
use adv_core::identity::Actor;

use crate::context::AppContext;

/// Build an `Actor` for a registered party, taking the role from the registry.
pub async fn resolve_actor(ctx: &AppContext, party_id: &str) -> anyhow::Result<Actor> {
    let party = ctx
        .service
        .get_party(party_id)
        .await
        .with_context(|| format!("unknown acting party '{party_id}'"))?;
    Ok(Actor::new(party.id, party.role))
}
