use std::path::Path;

use anyhow::Result;
use chrono::Datelike;

use placement_client::workflow::ExperienceWorkflow;
use placement_core::catalog::{group_by_company_and_year, ExperienceFilter};
use placement_core::error::CoreError;
use placement_core::experience::ExperiencePatch;
use placement_core::session::KeyValueStore;
use placement_core::transport::ExperienceRecord;
use placement_core::types::DbId;
use placement_core::wizard::{WizardMode, WizardStep};

use super::{api_failure, read_json, Context};
use crate::render;

pub async fn list<S: KeyValueStore>(
    ctx: &Context<S>,
    filter: ExperienceFilter,
    mine: bool,
    grouped: bool,
) -> Result<String> {
    let records = ctx
        .api
        .list_experiences()
        .await
        .map_err(|e| api_failure(e, "Failed to load experiences"))?;

    let mut shown = filter.apply(&records);
    if mine {
        let user = ctx.require_user()?;
        shown.retain(|r| r.owned_by(user));
    }

    if grouped {
        let selected: Vec<ExperienceRecord> = shown.into_iter().cloned().collect();
        let groups = group_by_company_and_year(&selected, ctx.today.year());
        return Ok(render::grouped(&groups));
    }
    Ok(render::experience_list(&shown))
}

pub async fn show<S: KeyValueStore>(ctx: &Context<S>, id: DbId) -> Result<String> {
    let record = ctx
        .api
        .get_experience(id)
        .await
        .map_err(|e| api_failure(e, "Failed to load experience"))?;
    Ok(render::experience_detail(&record))
}

/// Run a draft file through the wizard and submit it.
///
/// With `edit` the stored experience is loaded first and the draft is laid
/// over it; otherwise the form starts pre-filled from the signed-in user.
/// Fields the draft leaves out keep the opened form's values.
pub async fn submit<S: KeyValueStore>(
    ctx: &Context<S>,
    draft_path: &Path,
    edit: Option<DbId>,
) -> Result<String> {
    ctx.require_user()?;
    let draft: ExperiencePatch = read_json(draft_path)?;
    let session = ctx.sessions.session();
    let workflow = ExperienceWorkflow::new(ctx.api.clone());

    let mut opened = match edit {
        Some(id) => workflow
            .open_edit(id)
            .await
            .map_err(|e| api_failure(e, "Failed to load experience"))?,
        None => workflow.open_create(session).await,
    };

    let form = draft.apply_to(opened.wizard.form())?;
    *opened.wizard.form_mut() = form;
    while opened.wizard.step() != WizardStep::Summary {
        opened.wizard.next();
    }

    let record = workflow
        .submit(&mut opened.wizard, session, ctx.today)
        .await?;

    let verb = match opened.wizard.mode() {
        WizardMode::Create => "shared",
        WizardMode::Edit { .. } => "updated",
    };
    let id = record
        .id
        .map(|id| format!("#{id} "))
        .unwrap_or_default();
    let mut lines: Vec<String> = opened.notice.into_iter().collect();
    lines.push(format!(
        "Experience {id}{verb}: {} ({} rounds)",
        record.company_name(),
        record.total_rounds.unwrap_or_default()
    ));
    Ok(lines.join("\n"))
}

/// Delete one of the signed-in user's experiences. Admins may delete any.
pub async fn delete<S: KeyValueStore>(ctx: &Context<S>, id: DbId) -> Result<String> {
    let user = ctx.require_user()?;
    if !ctx.sessions.is_admin() {
        let record = ctx
            .api
            .get_experience(id)
            .await
            .map_err(|e| api_failure(e, "Failed to load experience"))?;
        if !record.owned_by(user) {
            return Err(CoreError::Forbidden("You can only delete your own experiences".into()).into());
        }
    }

    ExperienceWorkflow::new(ctx.api.clone())
        .delete(id)
        .await
        .map_err(|e| api_failure(e, "Failed to delete experience"))?;
    Ok(format!("Experience #{id} deleted"))
}
