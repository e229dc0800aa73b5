//! # Dockrun Container Façade
//!
//! File: cli/src/common/docker/operations.rs
//!
//! ## Overview
//!
//! `ContainerApi` sequences daemon calls into the four operations dockrun
//! exposes:
//!
//! - **`run_background`**: pull → create → start, returns the container ID.
//! - **`run_with_command`**: pull → create (with command, TTY) → start →
//!   wait for exit → read stdout logs, returns the captured output.
//! - **`stop`**: stop with a fixed 30-second grace period.
//! - **`list`**: the daemon's container list, untouched.
//!
//! Every daemon failure is tagged with the stage it happened in
//! (`DockrunError::Pull`, `Create`, `Start`, `Wait`, `Logs`, `Stop`, `List`)
//! and aborts the operation immediately. Nothing is retried and nothing
//! created by an earlier stage is cleaned up.
//!
//! The image is pulled on every run, whether or not it is already present.
//!
//! ## Usage
//!
//! ```rust
//! let daemon = BollardDaemon::new(connect_docker(&cfg.daemon)?);
//! let api = ContainerApi::new(&daemon, cfg.daemon.wait_timeout());
//! let output = api.run_with_command("alpine", &["echo".into(), "hi".into()]).await?;
//! daemon.close();
//! ```
//!
use crate::core::error::{DockrunError, Result};
use anyhow::{anyhow, Context};
use futures_util::TryStreamExt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::client::{ContainerInfo, ContainerSpec, DaemonClient, WaitOutcome};
use super::naming::short_name;

/// Grace period given to a container between the stop signal and a forced kill.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(30);

/// Sequences daemon calls for the run, stop and list operations.
pub struct ContainerApi<'a, D: DaemonClient + ?Sized> {
    daemon: &'a D,
    wait_timeout: Duration,
}

impl<'a, D: DaemonClient + ?Sized> ContainerApi<'a, D> {
    pub fn new(daemon: &'a D, wait_timeout: Duration) -> Self {
        Self {
            daemon,
            wait_timeout,
        }
    }

    /// Pulls `image`, then creates and starts a container from it without
    /// waiting for it to finish.
    ///
    /// Returns the new container's ID.
    #[instrument(skip(self))]
    pub async fn run_background(&self, image: &str) -> Result<String> {
        info!("Starting image {}", image);
        let spec = ContainerSpec {
            image: short_name(image).to_string(),
            cmd: None,
            tty: false,
        };
        self.pull_create_start(image, &spec).await
    }

    /// Pulls `image`, runs `cmd` in a new container with a TTY, waits for
    /// the container to exit and returns its stdout log.
    ///
    /// The wait is bounded by the configured wait timeout. If the wait
    /// fails or times out, the logs are not read.
    #[instrument(skip(self))]
    pub async fn run_with_command(&self, image: &str, cmd: &[String]) -> Result<String> {
        if cmd.is_empty() {
            return Err(anyhow!(DockrunError::EmptyCommand));
        }
        let spec = ContainerSpec {
            image: short_name(image).to_string(),
            cmd: Some(cmd.to_vec()),
            tty: true,
        };
        let id = self.pull_create_start(image, &spec).await?;

        let outcome = tokio::time::timeout(self.wait_timeout, self.daemon.wait_container(&id))
            .await
            .map_err(|_| {
                warn!(
                    "Container {} still running after {:?}; giving up on wait.",
                    id, self.wait_timeout
                );
                anyhow!(DockrunError::WaitTimeout {
                    id: id.clone(),
                    seconds: self.wait_timeout.as_secs(),
                })
            })?
            .context(DockrunError::Wait { id: id.clone() })?;
        let WaitOutcome::Exited { status_code } = outcome;
        debug!("Container {} exited with status {}", id, status_code);

        self.read_output(&id).await
    }

    /// Stops a container, giving it `STOP_TIMEOUT` to exit on its own.
    #[instrument(skip(self))]
    pub async fn stop(&self, id: &str) -> Result<()> {
        info!("Stopping container {}", id);
        self.daemon
            .stop_container(id, STOP_TIMEOUT)
            .await
            .context(DockrunError::Stop { id: id.to_string() })
    }

    /// Returns the daemon's container list in the order the daemon sent it.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ContainerInfo>> {
        self.daemon.list_containers().await.context(DockrunError::List)
    }

    async fn pull_create_start(&self, image: &str, spec: &ContainerSpec) -> Result<String> {
        if image.is_empty() {
            return Err(anyhow!(DockrunError::ImageNotProvided));
        }

        self.daemon.pull_image(image).await.context(DockrunError::Pull {
            image: image.to_string(),
        })?;

        let id = self
            .daemon
            .create_container(spec)
            .await
            .context(DockrunError::Create {
                image: spec.image.clone(),
            })?;

        self.daemon
            .start_container(&id)
            .await
            .context(DockrunError::Start { id: id.clone() })?;

        info!("Container {} started from {}", id, image);
        Ok(id)
    }

    // The stream is dropped on every return path, including a failed chunk.
    async fn read_output(&self, id: &str) -> Result<String> {
        let mut logs = self.daemon.container_logs(id);
        let mut output = Vec::new();
        while let Some(chunk) = logs
            .try_next()
            .await
            .context(DockrunError::Logs { id: id.to_string() })?
        {
            output.extend_from_slice(&chunk);
        }
        debug!("Read {} bytes of output from container {}", output.len(), id);
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}
