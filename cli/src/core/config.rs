//! # Dockrun Configuration
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads the small set of daemon settings dockrun honours: an optional
//! socket path, the bollard request timeout, and the bound on how long a
//! run-with-command waits for its container to exit.
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line overrides (`--wait-timeout` / `DOCKRUN_WAIT_TIMEOUT`), applied by `main`
//! 2. Project-specific `.dockrun.toml` in current directory or ancestors
//! 3. User-specific `<config dir>/dockrun/config.toml`
//! 4. Default values defined in the code
//!
//! ```toml
//! [daemon]
//! socket = "~/.docker/run/docker.sock"
//! request_timeout_secs = 600
//! wait_timeout_secs = 300
//! ```
//!
use crate::core::error::{DockrunError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

/// The resolved configuration after merging every source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub daemon: DaemonConfig,
}

/// Settings for the connection to the Docker daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// Unix socket of the daemon (can use ~). When unset, bollard's local
    /// defaults apply, which honour `DOCKER_HOST`.
    pub socket: Option<String>,
    /// Timeout applied by the client to every daemon request.
    pub request_timeout_secs: u64,
    /// How long `run` with a command waits for the container to exit.
    pub wait_timeout_secs: u64,
}

/// One configuration file as written on disk. Absent keys stay `None` so a
/// higher-precedence file only overrides what it actually sets.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    daemon: DaemonLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct DaemonLayer {
    socket: Option<String>,
    request_timeout_secs: Option<u64>,
    wait_timeout_secs: Option<u64>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            socket: None,
            request_timeout_secs: default_request_timeout(),
            wait_timeout_secs: default_wait_timeout(),
        }
    }
}

impl DaemonConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

fn default_request_timeout() -> u64 {
    600
}
fn default_wait_timeout() -> u64 {
    300
}

const PROJECT_CONFIG_FILENAME: &str = ".dockrun.toml";

/// Loads, merges, expands and validates configuration from all file sources.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let project_config = match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => {
            debug!("No project configuration file (.dockrun.toml) found.");
            None
        }
    };
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Dockrun", "dockrun") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

/// Walks from `start` towards the root looking for `.dockrun.toml`,
/// stopping at the first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

// Project values win over user values; defaults fill whatever neither sets.
fn merge_configs(user: ConfigFile, project: Option<ConfigFile>) -> Config {
    let project = project.unwrap_or_default().daemon;
    let user = user.daemon;
    let defaults = DaemonConfig::default();
    Config {
        daemon: DaemonConfig {
            socket: project.socket.or(user.socket),
            request_timeout_secs: project
                .request_timeout_secs
                .or(user.request_timeout_secs)
                .unwrap_or(defaults.request_timeout_secs),
            wait_timeout_secs: project
                .wait_timeout_secs
                .or(user.wait_timeout_secs)
                .unwrap_or(defaults.wait_timeout_secs),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(socket) = config.daemon.socket.as_mut() {
        *socket = shellexpand::tilde(socket.as_str()).into_owned();
        debug!("Expanded daemon socket path: {}", socket);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.daemon.request_timeout_secs == 0 {
        return Err(anyhow!(DockrunError::Config(
            "daemon.request_timeout_secs must be greater than zero.".to_string()
        )));
    }
    if config.daemon.wait_timeout_secs == 0 {
        return Err(anyhow!(DockrunError::Config(
            "daemon.wait_timeout_secs must be greater than zero.".to_string()
        )));
    }
    if matches!(config.daemon.socket.as_deref(), Some(s) if s.trim().is_empty()) {
        return Err(anyhow!(DockrunError::Config(
            "daemon.socket cannot be empty; remove it to use the local defaults.".to_string()
        )));
    }
    Ok(())
}
