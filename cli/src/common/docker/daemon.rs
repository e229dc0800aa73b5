//! # Bollard Daemon Client
//!
//! File: cli/src/common/docker/daemon.rs
//!
//! ## Overview
//!
//! `BollardDaemon` implements `DaemonClient` over a `bollard::Docker` handle.
//! Each method is one Docker Engine API call:
//!
//! | Method              | Engine endpoint                        |
//! |---------------------|----------------------------------------|
//! | `pull_image`        | `POST /images/create` (stream drained) |
//! | `create_container`  | `POST /containers/create`              |
//! | `start_container`   | `POST /containers/{id}/start`          |
//! | `wait_container`    | `POST /containers/{id}/wait?condition=not-running` |
//! | `container_logs`    | `GET /containers/{id}/logs?stdout=1`   |
//! | `stop_container`    | `POST /containers/{id}/stop?t=N`       |
//! | `list_containers`   | `GET /containers/json`                 |
//!
//! Errors are returned as `DockrunError::DockerApi`; the façade adds the
//! stage tag on top.
//!
use crate::core::error::{DockrunError, Result};
use anyhow::anyhow;
use async_trait::async_trait;
use bollard::{
    container::{
        Config as ContainerConfig, CreateContainerOptions, ListContainersOptions, LogsOptions,
        StartContainerOptions, StopContainerOptions, WaitContainerOptions,
    },
    image::CreateImageOptions,
    models::ContainerSummary,
    Docker,
};
use futures_util::{StreamExt, TryStreamExt};
use std::{pin::pin, time::Duration};
use tracing::{debug, info, instrument, warn};

use super::client::{ContainerInfo, ContainerSpec, DaemonClient, LogStream, WaitOutcome};
use super::naming::pull_tag;

/// The process-wide daemon connection, owned by `main` and lent to the façade.
pub struct BollardDaemon {
    docker: Docker,
}

impl BollardDaemon {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Releases the connection. Consuming `self` makes any later use a
    /// compile error.
    pub fn close(self) {
        debug!("Closing Docker daemon connection.");
        drop(self.docker);
    }
}

fn api_error(e: bollard::errors::Error) -> anyhow::Error {
    anyhow!(DockrunError::DockerApi { source: e })
}

impl From<ContainerSummary> for ContainerInfo {
    fn from(summary: ContainerSummary) -> Self {
        Self {
            id: summary.id.unwrap_or_default(),
            image: summary.image,
            state: summary.state,
            names: summary.names.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl DaemonClient for BollardDaemon {
    #[instrument(skip(self))]
    async fn pull_image(&self, reference: &str) -> Result<()> {
        info!("Pulling image {}", reference);
        let options = CreateImageOptions {
            from_image: reference,
            tag: pull_tag(reference).unwrap_or_default(),
            ..Default::default()
        };

        let mut progress = pin!(self.docker.create_image(Some(options), None, None));
        while let Some(update) = progress.next().await {
            let update = update.map_err(api_error)?;
            if let Some(status) = update.status {
                debug!(
                    "Pull {}: {}{}",
                    reference,
                    status,
                    update.id.map(|id| format!(" ({})", id)).unwrap_or_default()
                );
            }
        }
        debug!("Pull of {} complete.", reference);
        Ok(())
    }

    #[instrument(skip(self, spec), fields(image = %spec.image))]
    async fn create_container(&self, spec: &ContainerSpec) -> Result<String> {
        info!("Creating container {}", spec.image);
        let config = ContainerConfig {
            image: Some(spec.image.clone()),
            cmd: spec.cmd.clone(),
            tty: Some(spec.tty),
            ..Default::default()
        };

        let response = self
            .docker
            .create_container(None::<CreateContainerOptions<String>>, config)
            .await
            .map_err(api_error)?;
        for warning in &response.warnings {
            warn!("Daemon warning while creating {}: {}", spec.image, warning);
        }
        debug!("Created container {}", response.id);
        Ok(response.id)
    }

    #[instrument(skip(self))]
    async fn start_container(&self, id: &str) -> Result<()> {
        info!("Starting container {}", id);
        match self
            .docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
        {
            Ok(()) => Ok(()),
            // 304: already running.
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 304, ..
            }) => {
                info!("Container {} was already started.", id);
                Ok(())
            }
            Err(e) => Err(api_error(e)),
        }
    }

    #[instrument(skip(self))]
    async fn wait_container(&self, id: &str) -> Result<WaitOutcome> {
        debug!("Waiting for container {} to stop running", id);
        let options = WaitContainerOptions {
            condition: "not-running",
        };

        let mut responses = pin!(self.docker.wait_container(id, Some(options)));
        match responses.next().await {
            Some(Ok(response)) => Ok(WaitOutcome::Exited {
                status_code: response.status_code,
            }),
            // bollard reports a non-zero exit as an error; it is still a terminal status.
            Some(Err(bollard::errors::Error::DockerContainerWaitError { error, code })) => {
                debug!("Container {} exited with code {}: {}", id, code, error);
                Ok(WaitOutcome::Exited { status_code: code })
            }
            Some(Err(e)) => Err(api_error(e)),
            None => Err(anyhow!(
                "wait stream for container '{}' ended without a status",
                id
            )),
        }
    }

    fn container_logs<'a>(&'a self, id: &'a str) -> LogStream<'a> {
        debug!("Opening stdout log stream for container {}", id);
        let options = LogsOptions::<String> {
            stdout: true,
            ..Default::default()
        };
        self.docker
            .logs(id, Some(options))
            .map_ok(|chunk| chunk.into_bytes().to_vec())
            .map_err(api_error)
            .boxed()
    }

    #[instrument(skip(self, grace))]
    async fn stop_container(&self, id: &str, grace: Duration) -> Result<()> {
        info!("Stopping container {}", id);
        let options = StopContainerOptions {
            t: grace.as_secs() as i64,
        };
        match self.docker.stop_container(id, Some(options)).await {
            Ok(()) => Ok(()),
            // 304: already stopped.
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 304, ..
            }) => {
                info!("Container {} was already stopped.", id);
                Ok(())
            }
            Err(e) => Err(api_error(e)),
        }
    }

    #[instrument(skip(self))]
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        debug!("Listing containers");
        let summaries = self
            .docker
            .list_containers(Some(ListContainersOptions::<String>::default()))
            .await
            .map_err(api_error)?;
        Ok(summaries.into_iter().map(ContainerInfo::from).collect())
    }
}
