mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hostel_core::Hostel;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::commands::Context;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let color = output::should_color(&cli.global.color);
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "hostel", &mut std::io::stdout());
            Ok(())
        }

        // Session bookkeeping is local
        Command::Logout => {
            let cfg = config::load_config_or_default();
            let name = config::active_profile_name(&cli.global, &cfg);
            commands::session::logout(&name, color, &cli.global)
        }
        Command::Whoami => {
            let cfg = config::load_config_or_default();
            let name = config::active_profile_name(&cli.global, &cfg);
            commands::session::whoami(&name, color, &cli.global)
        }

        // All other commands talk to the backend
        cmd => {
            let ctx = build_context(&cli.global, color)?;
            tracing::debug!(command = ?cmd, profile = %ctx.profile_name, "dispatching command");
            let result = commands::dispatch(cmd, &ctx, &cli.global).await;
            ctx.hostel.shutdown().await;
            result
        }
    }
}

/// Build the backend facade from the config file, profile, and CLI overrides.
fn build_context(global: &GlobalOpts, color: bool) -> Result<Context, CliError> {
    let cfg = config::load_config()?;
    let (profile_name, profile) = config::active_profile(global, &cfg)?;
    let backend = config::resolve_backend(&profile, &profile_name, &cfg.defaults, global)?;
    let hostel = Hostel::new(backend)?;
    Ok(Context {
        hostel,
        profile_name,
        profile,
        color,
    })
}
