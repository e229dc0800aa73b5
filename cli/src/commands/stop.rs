//! # Dockrun Stop Handler
//!
//! File: cli/src/commands/stop.rs
//!
//! Implements `--mode stop`. The ID is passed to the daemon as given; an
//! empty or unknown ID is reported by the daemon, not validated here.
//!
use crate::common::docker::{ContainerApi, DaemonClient};
use crate::core::error::Result;
use tracing::info;

pub async fn handle_stop<D>(id: &str, api: &ContainerApi<'_, D>) -> Result<()>
where
    D: DaemonClient + ?Sized,
{
    api.stop(id).await?;
    info!("Container {} stopped", id);
    Ok(())
}
