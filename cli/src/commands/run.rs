//! # Dockrun Run Handler
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `--mode run`. Without a command the container is started in
//! the background and its ID printed. With a command, the handler waits for
//! the container to exit and prints what it wrote to stdout.
//!
//! A command can be given two ways:
//! - `--cmd "echo hi"`: a single string, split on every single space.
//!   There is no quoting; `"echo  hi"` yields `["echo", "", "hi"]`.
//! - `-- echo hi`: trailing arguments, used as tokens verbatim. This is the
//!   form to use for arguments containing spaces.
//!
use crate::common::docker::{ContainerApi, DaemonClient};
use crate::core::error::{DockrunError, Result};
use anyhow::{anyhow, Context};
use std::io::Write;
use tracing::info;

/// What `--mode run` should do, validated before connecting to the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunRequest {
    Background { image: String },
    Command { image: String, tokens: Vec<String> },
}

impl RunRequest {
    /// Builds a request from `--image`, `--cmd` and trailing tokens.
    ///
    /// An absent or empty `--cmd` with no trailing tokens means background.
    pub fn from_args(image: &str, cmd: Option<&str>, trailing: &[String]) -> Result<Self> {
        if image.is_empty() {
            return Err(anyhow!(DockrunError::ImageNotProvided));
        }
        let image = image.to_string();

        let tokens = match cmd {
            Some(cmd) if !cmd.is_empty() => split_command(cmd),
            _ => trailing.to_vec(),
        };

        if tokens.is_empty() {
            Ok(Self::Background { image })
        } else {
            Ok(Self::Command { image, tokens })
        }
    }
}

/// Splits a command string on single spaces.
pub fn split_command(cmd: &str) -> Vec<String> {
    cmd.split(' ').map(String::from).collect()
}

pub async fn handle_run<D, W>(
    request: RunRequest,
    api: &ContainerApi<'_, D>,
    out: &mut W,
) -> Result<()>
where
    D: DaemonClient + ?Sized,
    W: Write,
{
    match request {
        RunRequest::Background { image } => {
            let id = api
                .run_background(&image)
                .await
                .context("run container")?;
            info!("Container {} running in background", id);
            writeln!(out, "{}", id).context("Failed to write container ID")?;
        }
        RunRequest::Command { image, tokens } => {
            let output = api
                .run_with_command(&image, &tokens)
                .await
                .context("run container")?;
            writeln!(out, "{}", output).context("Failed to write command output")?;
        }
    }
    Ok(())
}
