//! Subcommand handlers.
//!
//! Each handler returns the text to print. Backend failures are turned into
//! the user-facing message of [`ApiError::user_message`] with the underlying
//! error kept as the cause.

mod account;
mod browse;
mod experiences;
mod mentors;

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use placement_client::api::{ApiError, PlacementApi};
use placement_core::error::CoreError;
use placement_core::session::{KeyValueStore, SessionStore};
use placement_core::user::UserProfile;

use crate::args::Command;

/// Everything a command needs: the API client and the persisted session.
pub struct Context<S> {
    pub api: PlacementApi,
    pub sessions: SessionStore<S>,
    /// Domain registration e-mails must belong to.
    pub email_domain: String,
    pub today: NaiveDate,
}

impl<S: KeyValueStore> Context<S> {
    /// Attach the stored token, if any, to `api`.
    pub fn new(
        api: PlacementApi,
        sessions: SessionStore<S>,
        email_domain: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        let api = api.with_token(sessions.token().map(str::to_string));
        Self {
            api,
            sessions,
            email_domain: email_domain.into(),
            today,
        }
    }

    fn require_user(&self) -> Result<&UserProfile, CoreError> {
        self.sessions
            .session()
            .require_user()
            .map_err(|_| CoreError::Unauthorized("Sign in first with `placement-tracker login`".into()))
    }

    fn require_admin(&self) -> Result<(), CoreError> {
        if self.sessions.is_admin() {
            Ok(())
        } else {
            Err(CoreError::Forbidden("Admin access required".into()))
        }
    }
}

pub async fn run<S: KeyValueStore>(ctx: &mut Context<S>, command: Command) -> Result<String> {
    match command {
        Command::Login { email, password } => account::login(ctx, email, password).await,
        Command::AdminLogin { username, password } => {
            account::admin_login(ctx, username, password).await
        }
        Command::Logout => account::logout(ctx),
        Command::Whoami => Ok(account::whoami(ctx)),
        Command::Register { form } => account::register(ctx, &form).await,
        Command::Departments { related } => browse::departments(ctx, related).await,
        Command::Companies { search } => browse::companies(ctx, search.as_deref()).await,
        Command::Experiences {
            filter,
            mine,
            grouped,
        } => experiences::list(ctx, filter.into(), mine, grouped).await,
        Command::Show { id } => experiences::show(ctx, id).await,
        Command::Submit { draft, edit } => experiences::submit(ctx, &draft, edit).await,
        Command::Delete { id } => experiences::delete(ctx, id).await,
        Command::Mentors { filter, pending } => mentors::list(ctx, filter.into(), pending).await,
        Command::ApproveMentor { id } => mentors::approve(ctx, id).await,
        Command::RejectMentor { id } => mentors::reject(ctx, id).await,
    }
}

fn api_failure(error: ApiError, fallback: &str) -> anyhow::Error {
    let message = error.user_message(fallback);
    anyhow::Error::new(error).context(message)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid form", path.display()))
}
