//! # Dockrun Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the dockrun CLI, a thin driver for the Docker daemon that
//! can run a container (optionally capturing a command's output), stop one,
//! or list them. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and opening the daemon connection
//! - Routing to the handler for the selected mode
//!
//! Command processing flow:
//! 1. Normalize single-dash long flags, then parse via Clap (unknown modes
//!    are rejected here)
//! 2. Configure logging based on verbosity level
//! 3. Validate the selected mode's arguments
//! 4. Load configuration, connect to the daemon
//! 5. Run the handler, close the connection, report any error
//!
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Mode handlers (run, stop, list)
mod common; // Docker daemon boundary and container façade
mod core; // Errors and configuration

use crate::common::docker::{self, BollardDaemon, ContainerApi};
use crate::core::{
    config,
    error::{stage_of, Result},
};

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "dockrun",
    about = "Run, stop, and list containers on the local Docker daemon",
    long_about = "Run, stop, and list containers on the local Docker daemon.\n\
                  With no arguments, lists container IDs.",
    version
)]
struct Cli {
    #[command(flatten)]
    args: commands::ModeArgs,

    /// Seconds to wait for a container running a command to exit.
    #[arg(
        long,
        env = "DOCKRUN_WAIT_TIMEOUT",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    wait_timeout: Option<u64>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(commands::normalize_flag_spelling(std::env::args_os()));

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        if let Some(stage) = stage_of(&e) {
            tracing::debug!("Failed stage: {:?}", stage);
        }
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let action = commands::Action::from_args(&cli.args)?;

    let mut cfg = config::load_config().context("Failed to load dockrun configuration")?;
    if let Some(secs) = cli.wait_timeout {
        cfg.daemon.wait_timeout_secs = secs;
    }

    let daemon = BollardDaemon::new(docker::connect_docker(&cfg.daemon)?);
    let api = ContainerApi::new(&daemon, cfg.daemon.wait_timeout());
    let result = commands::execute(action, &api, &mut std::io::stdout()).await;
    daemon.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Mode;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults_to_list() {
        let cli = Cli::try_parse_from(["dockrun"]).unwrap();
        assert_eq!(cli.args.mode, Mode::List);
        assert!(cli.args.image.is_empty());
        assert!(cli.args.cmd.is_none());
        assert!(cli.args.command.is_empty());
    }

    #[test]
    fn test_run_flags_parse() {
        let cli = Cli::try_parse_from([
            "dockrun",
            "--mode",
            "run",
            "--image",
            "registry.example.com/library/alpine",
            "--cmd",
            "echo hi",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.args.mode, Mode::Run);
        assert_eq!(cli.args.image, "registry.example.com/library/alpine");
        assert_eq!(cli.args.cmd.as_deref(), Some("echo hi"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_trailing_tokens_parse_verbatim() {
        let cli = Cli::try_parse_from([
            "dockrun", "-m", "run", "-i", "alpine", "--", "sh", "-c", "echo a b",
        ])
        .unwrap();
        assert_eq!(cli.args.command, vec!["sh", "-c", "echo a b"]);
    }

    #[test]
    fn test_cmd_and_trailing_tokens_conflict() {
        let err = Cli::try_parse_from([
            "dockrun", "-m", "run", "-i", "alpine", "-c", "echo hi", "--", "echo", "hi",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = Cli::try_parse_from(["dockrun", "--mode", "restart"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_zero_wait_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["dockrun", "--wait-timeout", "0"]).is_err());
    }

    #[test]
    fn test_single_dash_flags_parse() {
        let args = commands::normalize_flag_spelling(["dockrun", "-mode", "stop", "-id", "abc"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.args.mode, Mode::Stop);
        assert_eq!(cli.args.id, "abc");

        let args = commands::normalize_flag_spelling([
            "dockrun", "-mode", "run", "-image", "alpine", "-cmd", "echo hi",
        ]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.args.mode, Mode::Run);
        assert_eq!(cli.args.image, "alpine");
        assert_eq!(cli.args.cmd.as_deref(), Some("echo hi"));
    }

    #[test]
    fn test_stop_id_parses() {
        let cli = Cli::try_parse_from(["dockrun", "--mode", "stop", "--id", "3f2a"]).unwrap();
        assert_eq!(cli.args.mode, Mode::Stop);
        assert_eq!(cli.args.id, "3f2a");
    }
}
