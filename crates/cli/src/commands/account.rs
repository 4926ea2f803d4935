use std::path::Path;

use anyhow::{Context as _, Result};
use validator::Validate;

use placement_core::registration::{
    password_strength, AdminLoginRequest, LoginRequest, Registration,
};
use placement_core::session::KeyValueStore;
use placement_core::user::UserRole;

use super::{api_failure, read_json, Context};
use crate::render;

pub async fn login<S: KeyValueStore>(
    ctx: &mut Context<S>,
    email: String,
    password: String,
) -> Result<String> {
    let credentials = LoginRequest { email, password };
    credentials.validate().context("Invalid login details")?;

    let response = ctx
        .api
        .login(&credentials)
        .await
        .map_err(|e| api_failure(e, "Login failed"))?;
    ctx.sessions
        .login(response.user.clone(), response.token.clone())?;
    ctx.api = ctx.api.clone().with_token(response.token);
    tracing::info!(user_id = response.user.id, "Signed in");

    Ok(format!("{}\n{}", response.message, render::user(&response.user)))
}

pub async fn admin_login<S: KeyValueStore>(
    ctx: &mut Context<S>,
    username: String,
    password: String,
) -> Result<String> {
    let admin = ctx
        .api
        .admin_login(&AdminLoginRequest { username, password })
        .await
        .map_err(|e| api_failure(e, "Admin login failed"))?;
    let text = render::admin(&admin);
    tracing::info!(admin_id = %admin.id, "Signed in as admin");
    ctx.sessions.login_admin(admin)?;
    ctx.api = ctx.api.clone().with_token(None);
    Ok(text)
}

pub fn logout<S: KeyValueStore>(ctx: &mut Context<S>) -> Result<String> {
    ctx.sessions.logout()?;
    Ok("Signed out".to_string())
}

pub fn whoami<S: KeyValueStore>(ctx: &Context<S>) -> String {
    if let Some(admin) = ctx.sessions.admin() {
        return render::admin(admin);
    }
    match ctx.sessions.session().user() {
        Some(user) => render::user(user),
        None => "Not signed in".to_string(),
    }
}

/// Students are signed in straight away; mentors wait for approval.
pub async fn register<S: KeyValueStore>(ctx: &mut Context<S>, path: &Path) -> Result<String> {
    let form: Registration = read_json(path)?;
    form.validate(&ctx.email_domain)?;
    let strength = password_strength(form.password());

    let response = ctx
        .api
        .register(&form)
        .await
        .map_err(|e| api_failure(e, "Registration failed. Please try again."))?;

    let mut lines = vec![format!("Password strength: {:?}", strength.label)];
    match form.role() {
        UserRole::Mentor => {
            lines.push(format!(
                "Registered {}. An admin must approve the account before you can sign in.",
                form.email()
            ));
        }
        _ => {
            ctx.sessions
                .login(response.user.clone(), response.token.clone())?;
            ctx.api = ctx.api.clone().with_token(response.token);
            lines.push(render::user(&response.user));
        }
    }
    Ok(lines.join("\n"))
}
