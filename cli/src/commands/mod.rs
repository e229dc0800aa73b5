//! # Dockrun Command Dispatcher
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Turns the parsed command line into exactly one façade call and prints
//! its result. Dispatch happens in two steps:
//!
//! 1. `Action::from_args` validates the arguments for the selected mode.
//!    This runs before any connection to the daemon is made, so a missing
//!    image is reported without touching Docker.
//! 2. `execute` hands the action to the matching handler (`run`, `stop`,
//!    `list`), which calls `ContainerApi` and writes results to `out`.
//!
//! ```bash
//! dockrun                                   # list container IDs
//! dockrun --mode run --image alpine         # start in background, print ID
//! dockrun --mode run --image alpine --cmd "echo hi"
//! dockrun --mode run --image alpine -- sh -c "echo hi; echo there"
//! dockrun --mode stop --id 3f2a...
//! dockrun -mode run -image alpine -cmd "echo hi"   # single-dash spelling
//! ```
//!
//! The single-dash long spellings `-mode`, `-image`, `-cmd` and `-id` (and
//! their `-flag=value` forms) are rewritten to `--flag` by
//! `normalize_flag_spelling` before clap sees them.
//!
use crate::common::docker::{ContainerApi, DaemonClient};
use crate::core::error::Result;
use clap::{Args, ValueEnum};
use std::ffi::OsString;
use std::io::Write;
use tracing::debug;

pub mod list;
pub mod run;
pub mod stop;

/// The operation selected with `--mode`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Pull an image and start a container, optionally running a command.
    /// Prints the container ID, or the command's output.
    Run,
    /// Stop a container.
    Stop,
    /// List container IDs.
    #[default]
    List,
}

/// Mode selection plus the parameters the modes consume.
#[derive(Args, Debug)]
pub struct ModeArgs {
    /// Operation to perform. `run` without a command prints the new
    /// container's ID on stdout; with a command it prints the command's output.
    #[arg(short, long, value_enum, default_value_t = Mode::List)]
    pub mode: Mode,

    /// Container image, e.g. docker.io/library/alpine. A background run
    /// prints the started container's ID.
    #[arg(short, long, default_value = "")]
    pub image: String,

    /// Command to run in the container, split on single spaces. Optional.
    #[arg(short, long, conflicts_with = "command")]
    pub cmd: Option<String>,

    /// Container ID (for `--mode stop`).
    #[arg(long, default_value = "")]
    pub id: String,

    /// Command tokens to run in the container, taken verbatim. Use after `--`.
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Long flags that may also be written with a single dash.
const SINGLE_DASH_FLAGS: &[&str] = &["mode", "image", "cmd", "id"];

/// Flags whose next argument is a value and must not be rewritten.
const VALUE_FLAGS: &[&str] = &[
    "-m", "-i", "-c", "--mode", "--image", "--cmd", "--id", "--wait-timeout",
];

/// Rewrites `-mode`, `-image`, `-cmd`, `-id` (and `-flag=value`) to their
/// `--flag` form. Flag values and everything after `--` pass through as is.
pub fn normalize_flag_spelling<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut pass_through = false;
    let mut value_next = false;
    for arg in args.into_iter().map(Into::into) {
        if pass_through || std::mem::take(&mut value_next) {
            normalized.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            pass_through = true;
            normalized.push(arg);
            continue;
        }

        let rewritten = text
            .strip_prefix('-')
            .filter(|rest| !rest.starts_with('-'))
            .and_then(|rest| {
                let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                SINGLE_DASH_FLAGS
                    .contains(&name)
                    .then(|| format!("-{}", text))
            });
        let arg = rewritten.map(OsString::from).unwrap_or(arg);
        value_next = arg.to_str().is_some_and(|a| VALUE_FLAGS.contains(&a));
        normalized.push(arg);
    }
    normalized
}

/// A validated request for one façade operation.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Run(run::RunRequest),
    Stop { id: String },
    List,
}

impl Action {
    pub fn from_args(args: &ModeArgs) -> Result<Self> {
        let action = match args.mode {
            Mode::Run => Action::Run(run::RunRequest::from_args(
                &args.image,
                args.cmd.as_deref(),
                &args.command,
            )?),
            Mode::Stop => Action::Stop {
                id: args.id.clone(),
            },
            Mode::List => Action::List,
        };
        debug!("Resolved action: {:?}", action);
        Ok(action)
    }
}

/// Runs `action` against `api`, writing any output to `out`.
pub async fn execute<D, W>(action: Action, api: &ContainerApi<'_, D>, out: &mut W) -> Result<()>
where
    D: DaemonClient + ?Sized,
    W: Write,
{
    match action {
        Action::Run(request) => run::handle_run(request, api, out).await,
        Action::Stop { id } => stop::handle_stop(&id, api).await,
        Action::List => list::handle_list(api, out).await,
    }
}
