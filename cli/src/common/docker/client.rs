//! # Daemon Client Boundary
//!
//! File: cli/src/common/docker/client.rs
//!
//! ## Overview
//!
//! The `DaemonClient` trait is the seam between the container façade
//! (`operations::ContainerApi`) and the Docker daemon. It names exactly the
//! calls the façade sequences: pull, create, start, wait, logs, stop, list.
//!
//! The production implementation is `daemon::BollardDaemon`; tests drive the
//! façade through an in-memory recording implementation instead.
//!
use crate::core::error::Result;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use std::time::Duration;

/// What to create: the image label plus an optional command override.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerSpec {
    /// Image the container is created from.
    pub image: String,
    /// Command override. `None` keeps the image's default command.
    pub cmd: Option<Vec<String>>,
    /// Allocate a pseudo-terminal.
    pub tty: bool,
}

/// Terminal status reported once a container reaches the non-running condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Exited { status_code: i64 },
}

/// A container as reported by the daemon's list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerInfo {
    pub id: String,
    pub image: Option<String>,
    pub state: Option<String>,
    pub names: Vec<String>,
}

/// Chunks of a container's stdout log, in the order the daemon sends them.
/// Dropping the stream releases the underlying connection.
pub type LogStream<'a> = BoxStream<'a, Result<Vec<u8>>>;

/// Operations dockrun needs from a container daemon.
#[async_trait]
pub trait DaemonClient: Send + Sync {
    /// Pulls `reference`, returning once the daemon reports the pull finished.
    async fn pull_image(&self, reference: &str) -> Result<()>;

    /// Creates a container and returns the ID the daemon assigned to it.
    async fn create_container(&self, spec: &ContainerSpec) -> Result<String>;

    async fn start_container(&self, id: &str) -> Result<()>;

    /// Resolves when the container reaches the non-running condition, or
    /// with the first error the daemon reports while waiting.
    async fn wait_container(&self, id: &str) -> Result<WaitOutcome>;

    /// Opens the container's stdout log stream.
    fn container_logs<'a>(&'a self, id: &'a str) -> LogStream<'a>;

    /// Stops the container, allowing `grace` before the daemon kills it.
    async fn stop_container(&self, id: &str, grace: Duration) -> Result<()>;

    /// Lists containers with the daemon's default filtering.
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>>;
}
