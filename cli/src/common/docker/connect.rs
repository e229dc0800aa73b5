//! # Dockrun Docker Connection Helper
//!
//! File: cli/src/common/docker/connect.rs
//!
//! ## Overview
//!
//! Provides `connect_docker`, the single place where a `bollard::Docker`
//! client is constructed from the loaded `DaemonConfig`.
//!
//! - With no `daemon.socket` configured, `Docker::connect_with_local_defaults()`
//!   is used, which honours `DOCKER_HOST` and falls back to the platform socket.
//! - With a socket configured, `Docker::connect_with_unix` targets it directly.
//!
//! In both cases the client's request timeout is set from
//! `daemon.request_timeout_secs`. Failures are tagged `DockrunError::Connect`.
//!
use crate::core::config::DaemonConfig;
use crate::core::error::{DockrunError, Result};
use anyhow::{anyhow, Context};
use bollard::{Docker, API_DEFAULT_VERSION};
use tracing::{debug, instrument};

/// Builds a Docker client for the configured daemon.
///
/// A configured socket path that does not exist fails here. Otherwise an
/// unreachable daemon surfaces on the first request.
#[instrument(skip(config))]
pub fn connect_docker(config: &DaemonConfig) -> Result<Docker> {
    let docker = match config.socket.as_deref() {
        Some(socket) => {
            debug!("Connecting to Docker daemon at socket {}", socket);
            Docker::connect_with_unix(socket, config.request_timeout_secs, API_DEFAULT_VERSION)
        }
        None => {
            debug!("Connecting to Docker daemon with local defaults");
            Docker::connect_with_local_defaults()
        }
    }
    .map_err(|e| anyhow!(DockrunError::DockerApi { source: e }))
    .context(DockrunError::Connect)?;

    Ok(docker.with_timeout(config.request_timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::stage_of;

    #[tokio::test]
    #[ignore] // Requires a running Docker daemon.
    async fn test_connect_docker_success() {
        let docker = connect_docker(&DaemonConfig::default()).expect("client should build");
        assert!(docker.ping().await.is_ok(), "daemon should answer ping");
    }

    #[tokio::test]
    async fn test_connect_with_missing_socket_is_tagged_connect() {
        let config = DaemonConfig {
            socket: Some("/nonexistent/docker.sock".into()),
            ..Default::default()
        };
        let err = connect_docker(&config).unwrap_err();
        assert!(matches!(stage_of(&err), Some(DockrunError::Connect)));
        assert!(format!("{:#}", err).starts_with("Failed to connect to Docker daemon"));
    }
}
