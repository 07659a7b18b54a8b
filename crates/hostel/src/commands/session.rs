//! Administrator session: login, logout, whoami.

use std::fmt::Write as _;
use std::io::IsTerminal;

use chrono::Utc;
use dialoguer::Input;
use secrecy::SecretString;

use crate::cli::GlobalOpts;
use crate::config::{self, AdminSession};
use crate::error::CliError;
use crate::output;

use super::Context;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn session_detail(profile: &str, s: &AdminSession, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {profile}", output::label("Profile:", color));
    let _ = writeln!(out, "{}  {}", output::label("User:", color), s.username);
    let _ = writeln!(out, "{}  {}", output::label("Admin ID:", color), s.admin_id);
    let _ = write!(
        out,
        "{}  {}",
        output::label("Since:", color),
        s.logged_in_at.format("%Y-%m-%d %H:%M UTC")
    );
    out
}

pub async fn login(
    ctx: &Context,
    username: Option<String>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let interactive = std::io::stdin().is_terminal();

    // 1. Username (flag > profile > env > prompt)
    let username = match username.or_else(|| config::resolve_username(&ctx.profile)) {
        Some(u) => u,
        None if interactive => Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_err)?,
        None => {
            return Err(CliError::NoCredentials {
                profile: ctx.profile_name.clone(),
            });
        }
    };

    // 2. Password (env > keyring > config > prompt)
    let password = match config::resolve_password(&ctx.profile, &ctx.profile_name) {
        Ok(pw) => pw,
        Err(_) if interactive => {
            SecretString::from(rpassword::prompt_password("Password: ").map_err(prompt_err)?)
        }
        Err(e) => return Err(e.into()),
    };

    // 3. Authenticate and persist
    let admin_id = ctx.hostel.login(&username, &password).await?;
    let session = AdminSession {
        admin_id,
        username,
        logged_in_at: Utc::now(),
    };
    config::save_session(&ctx.profile_name, &session)?;

    output::success(
        format!("Logged in as {} (profile '{}')", session.username, ctx.profile_name),
        ctx.color,
        global.quiet,
    );
    Ok(())
}

/// Forget the stored session. Needs no backend.
pub fn logout(profile_name: &str, color: bool, global: &GlobalOpts) -> Result<(), CliError> {
    if config::clear_session(profile_name)? {
        output::success(format!("Logged out of profile '{profile_name}'"), color, global.quiet);
    } else {
        output::warning(format!("Profile '{profile_name}' was not logged in"), color);
    }
    Ok(())
}

/// Show the stored session, or fail with "not logged in".
pub fn whoami(profile_name: &str, color: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let session = config::load_session(profile_name)?.ok_or_else(|| CliError::NotLoggedIn {
        profile: profile_name.into(),
    })?;
    let out = output::render_single(
        &global.output,
        &session,
        |s| session_detail(profile_name, s, color),
        |s| s.username.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
