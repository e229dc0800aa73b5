//! # Dockrun List Handler
//!
//! File: cli/src/commands/list.rs
//!
//! Implements `--mode list`: prints one container ID per line, in the order
//! the daemon returned them.
//!
use crate::common::docker::{ContainerApi, DaemonClient};
use crate::core::error::Result;
use anyhow::Context;
use std::io::Write;
use tracing::debug;

pub async fn handle_list<D, W>(api: &ContainerApi<'_, D>, out: &mut W) -> Result<()>
where
    D: DaemonClient + ?Sized,
    W: Write,
{
    let containers = api.list().await?;
    debug!("Daemon returned {} containers", containers.len());
    for container in &containers {
        debug!(
            "{} image={:?} state={:?} names={:?}",
            container.id, container.image, container.state, container.names
        );
        writeln!(out, "{}", container.id).context("Failed to write container ID")?;
    }
    Ok(())
}
