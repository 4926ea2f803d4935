use anyhow::Result;

use placement_core::department::related_departments;
use placement_core::session::KeyValueStore;

use super::{api_failure, Context};
use crate::render;

/// All departments, or those sharing a group with `related`.
pub async fn departments<S: KeyValueStore>(
    ctx: &Context<S>,
    related: Option<String>,
) -> Result<String> {
    let all = ctx
        .api
        .list_departments()
        .await
        .map_err(|e| api_failure(e, "Failed to load departments"))?;
    let shown = match related.as_deref() {
        Some(id) => related_departments(&all, id).into_iter().cloned().collect::<Vec<_>>(),
        None => all,
    };
    Ok(render::departments(&shown))
}

pub async fn companies<S: KeyValueStore>(ctx: &Context<S>, search: Option<&str>) -> Result<String> {
    let result = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(query) => ctx.api.search_companies(query).await,
        None => ctx.api.list_companies().await,
    };
    let companies = result.map_err(|e| api_failure(e, "Failed to load companies"))?;
    Ok(render::companies(&companies))
}
