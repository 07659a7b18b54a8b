//! `hostel-tui`: terminal front end for guests and front-desk staff.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive state from
//! `hostel-core`. Screens are navigable via number keys (1-4): Rooms,
//! Book, Front Desk, and Inbox. The last two need an administrator login.
//!
//! Logs go to a daily file in the data directory so they never corrupt
//! the terminal. A background data bridge streams booking and admin
//! state into the TUI action loop.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod login;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hostel_config::Profile;
use hostel_core::{BackendConfig, Hostel};

use crate::app::App;

/// Book rooms and run the hostel front desk from the terminal.
#[derive(Parser, Debug)]
#[command(name = "hostel-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short, long, env = "HOSTEL_PROFILE")]
    profile: Option<String>,

    /// Backend URL, overriding the profile (e.g., http://localhost:8080)
    #[arg(short = 'u', long, env = "HOSTEL_API_URL")]
    api_url: Option<String>,

    /// Directory for the log file (defaults to the data directory)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// TUI owns the terminal. The guard must live until exit to flush logs.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hostel_tui={log_level},hostel_core={log_level},hostel_api={log_level}"
        ))
    });

    let log_dir = cli.log_dir.clone().unwrap_or_else(hostel_config::log_dir);
    let file_appender = tracing_appender::rolling::daily(log_dir, "hostel-tui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the backend from config file, stored session, and flags.
fn build_backend(cli: &Cli) -> Result<(String, Profile, BackendConfig)> {
    let cfg = hostel_config::load_config().wrap_err("could not load config")?;
    let profile_name = cli
        .profile
        .clone()
        .unwrap_or_else(|| cfg.default_profile_name().to_owned());
    let profile = cfg.profile(&profile_name)?;

    let session = hostel_config::load_session(&profile_name)
        .wrap_err("could not read admin session")?;
    let mut backend =
        hostel_config::profile_to_backend_config(&profile, &cfg.defaults, session.as_ref())?;

    if let Some(url) = &cli.api_url {
        backend.url = url
            .parse()
            .wrap_err_with(|| format!("invalid backend URL: {url}"))?;
    }

    Ok((profile_name, profile, backend))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first so a panic during setup still restores the terminal.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let (profile_name, profile, backend) = build_backend(&cli)?;
    info!(
        profile = %profile_name,
        url = %backend.url,
        admin = ?backend.admin_id,
        "starting hostel-tui"
    );

    let hostel = Hostel::new(backend)?;
    let mut app = App::new(
        hostel,
        profile_name,
        hostel_config::resolve_username(&profile),
    );
    app.run().await?;

    Ok(())
}
