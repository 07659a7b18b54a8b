//! CLI configuration: thin wrapper around `hostel_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --timeout, etc.).

use std::time::Duration;

use hostel_core::BackendConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use hostel_config::{
    AdminSession, Config, Defaults, Profile, clear_session, config_path, load_config,
    load_config_or_default, load_session, resolve_password, resolve_username, save_config,
    save_session, store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.default_profile_name().to_owned())
}

/// Look up the active profile, listing the known ones when it is missing.
pub fn active_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);
    match config.profile(&name) {
        Ok(profile) => Ok((name, profile)),
        Err(_) => Err(CliError::ProfileNotFound {
            available: available_profiles(config),
            name,
        }),
    }
}

pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Translate a `Profile` + global flags into a `BackendConfig`.
///
/// CLI flag overrides take priority over profile values; the stored
/// admin session for the profile, if any, is carried along.
pub fn resolve_backend(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<BackendConfig, CliError> {
    let session = load_session(profile_name)?;
    let mut backend = hostel_config::profile_to_backend_config(profile, defaults, session.as_ref())?;

    // 1. URL (flag > env > profile)
    if let Some(ref url_str) = global.api_url {
        backend.url = url_str.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }

    // 2. TLS
    if global.insecure {
        backend.accept_invalid_certs = true;
    }

    // 3. Timeout
    if let Some(secs) = global.timeout {
        backend.timeout = Duration::from_secs(secs);
    }

    Ok(backend)
}
