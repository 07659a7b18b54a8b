//! Shared configuration for the hostel CLI and TUI.
//!
//! TOML profiles, password resolution (env + keyring + plaintext), the
//! persisted admin session, and translation to
//! `hostel_core::BackendConfig`. Both binaries depend on this crate; the
//! CLI layers `GlobalOpts` overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use hostel_core::{BackendConfig, PricingTable};

/// Keyring service name for stored passwords.
pub const KEYRING_SERVICE: &str = "hostel";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use when none is given explicitly.
    pub fn default_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    /// Profile by name. A missing `default` profile resolves to the
    /// built-in local backend so a fresh install works out of the box.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if name == "default" => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile { name: name.into() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Delivery attempts before a queued notification is dropped.
    #[serde(default = "default_outbox_max_attempts")]
    pub outbox_max_attempts: u32,

    /// Seconds between outbox retries in long-running front ends.
    #[serde(default = "default_outbox_retry_secs")]
    pub outbox_retry_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            outbox_max_attempts: default_outbox_max_attempts(),
            outbox_retry_secs: default_outbox_retry_secs(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_outbox_max_attempts() -> u32 {
    hostel_core::outbox::DEFAULT_MAX_ATTEMPTS
}
fn default_outbox_retry_secs() -> u64 {
    60
}
fn default_api_url() -> String {
    "http://localhost:8080".into()
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:8080").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Administrator username.
    pub username: Option<String>,

    /// Administrator password (plaintext; prefer keyring).
    pub password: Option<String>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Nightly rates keyed by room code (`RN1` = 25). Empty means the
    /// built-in rates.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pricing: BTreeMap<String, u32>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            username: None,
            password: None,
            timeout: None,
            insecure: None,
            pricing: BTreeMap::new(),
        }
    }
}

impl Profile {
    pub fn pricing_table(&self) -> PricingTable {
        if self.pricing.is_empty() {
            PricingTable::default()
        } else {
            PricingTable::from_codes(self.pricing.iter().map(|(code, rate)| (code.as_str(), *rate)))
        }
    }

    pub fn parsed_url(&self) -> Result<url::Url, ConfigError> {
        self.api_url.parse().map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", self.api_url),
        })
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "hostel", "hostel")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    for part in parts {
        p.push(part);
    }
    p
}

/// Resolve the config file path. `HOSTEL_CONFIG` wins over platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("HOSTEL_CONFIG") {
        return PathBuf::from(path);
    }
    project_dirs().map_or_else(
        || home_fallback(&[".config", "hostel", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory for session, outbox and log files. `HOSTEL_DATA_DIR` wins
/// over platform conventions.
pub fn data_dir() -> PathBuf {
    if let Some(path) = std::env::var_os("HOSTEL_DATA_DIR") {
        return PathBuf::from(path);
    }
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "hostel"]),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

pub fn session_path() -> PathBuf {
    data_dir().join("session.toml")
}

pub fn outbox_path() -> PathBuf {
    data_dir().join("outbox.json")
}

pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Layer defaults, the TOML file at `path` (if present), and `HOSTEL_`
/// environment variables (`__` separates nested keys).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HOSTEL_").split("__"));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "config loaded");
    Ok(config)
}

/// Load config, returning a default if it is missing or unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

/// Resolve the administrator password: `HOSTEL_PASSWORD`, then the
/// system keyring, then plaintext in the profile.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var("HOSTEL_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Username from the profile or `HOSTEL_USERNAME`.
pub fn resolve_username(profile: &Profile) -> Option<String> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var("HOSTEL_USERNAME").ok())
}

/// Store a password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?
        .set_password(password)
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

// ── Admin session ───────────────────────────────────────────────────

/// A logged-in administrator. Presence admits the holder to admin
/// commands; there is no expiry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdminSession {
    pub admin_id: i64,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct SessionFile {
    #[serde(default)]
    sessions: BTreeMap<String, AdminSession>,
}

fn read_sessions(path: &Path) -> Result<SessionFile, ConfigError> {
    if !path.exists() {
        return Ok(SessionFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_sessions(path: &Path, file: &SessionFile) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(file)?)?;
    Ok(())
}

pub fn load_session(profile_name: &str) -> Result<Option<AdminSession>, ConfigError> {
    load_session_at(&session_path(), profile_name)
}

pub fn load_session_at(path: &Path, profile_name: &str) -> Result<Option<AdminSession>, ConfigError> {
    Ok(read_sessions(path)?.sessions.remove(profile_name))
}

pub fn save_session(profile_name: &str, session: &AdminSession) -> Result<(), ConfigError> {
    save_session_at(&session_path(), profile_name, session)
}

pub fn save_session_at(
    path: &Path,
    profile_name: &str,
    session: &AdminSession,
) -> Result<(), ConfigError> {
    let mut file = read_sessions(path)?;
    file.sessions.insert(profile_name.into(), session.clone());
    write_sessions(path, &file)
}

/// Remove the stored session. Returns `true` if one existed.
pub fn clear_session(profile_name: &str) -> Result<bool, ConfigError> {
    clear_session_at(&session_path(), profile_name)
}

pub fn clear_session_at(path: &Path, profile_name: &str) -> Result<bool, ConfigError> {
    let mut file = read_sessions(path)?;
    let removed = file.sessions.remove(profile_name).is_some();
    if removed {
        write_sessions(path, &file)?;
    }
    Ok(removed)
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `BackendConfig` from a profile and global defaults, with no
/// CLI overrides. The outbox lives in the data directory.
pub fn profile_to_backend_config(
    profile: &Profile,
    defaults: &Defaults,
    session: Option<&AdminSession>,
) -> Result<BackendConfig, ConfigError> {
    let mut config = BackendConfig::new(profile.parsed_url()?);
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.accept_invalid_certs = profile.insecure.unwrap_or(defaults.insecure);
    config.pricing = profile.pricing_table();
    config.outbox_path = Some(outbox_path());
    config.outbox_max_attempts = defaults.outbox_max_attempts;
    config.outbox_retry_interval = Duration::from_secs(defaults.outbox_retry_secs.max(1));
    config.admin_id = session.map(|s| s.admin_id);
    Ok(config)
}
