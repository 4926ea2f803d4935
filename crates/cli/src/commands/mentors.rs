use anyhow::Result;

use placement_core::catalog::MentorFilter;
use placement_core::session::KeyValueStore;
use placement_core::types::DbId;

use super::{api_failure, Context};
use crate::render;

/// Approved mentors, or the approval queue with `pending`.
pub async fn list<S: KeyValueStore>(
    ctx: &Context<S>,
    filter: MentorFilter,
    pending: bool,
) -> Result<String> {
    let result = if pending {
        ctx.require_admin()?;
        ctx.api.list_pending_mentors().await
    } else {
        ctx.api.list_mentors().await
    };
    let mentors = result.map_err(|e| api_failure(e, "Failed to load mentors"))?;
    Ok(render::mentors(&filter.apply(&mentors)))
}

pub async fn approve<S: KeyValueStore>(ctx: &Context<S>, id: DbId) -> Result<String> {
    ctx.require_admin()?;
    ctx.api
        .approve_mentor(id)
        .await
        .map_err(|e| api_failure(e, "Failed to approve mentor"))?;
    tracing::info!(mentor_id = id, "Mentor approved");
    Ok(format!("Mentor {id} approved"))
}

pub async fn reject<S: KeyValueStore>(ctx: &Context<S>, id: DbId) -> Result<String> {
    ctx.require_admin()?;
    ctx.api
        .reject_mentor(id)
        .await
        .map_err(|e| api_failure(e, "Failed to reject mentor"))?;
    tracing::info!(mentor_id = id, "Mentor rejected");
    Ok(format!("Mentor {id} rejected"))
}
