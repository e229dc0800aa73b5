//! # Dockrun Docker Module Interface
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! Everything dockrun knows about the Docker daemon lives here, organised
//! into submodules:
//!
//! - **`connect`**: Builds the `bollard::Docker` client from configuration.
//! - **`client`**: The `DaemonClient` trait and the data it exchanges.
//! - **`daemon`**: `BollardDaemon`, the `DaemonClient` backed by bollard.
//! - **`naming`**: Image reference helpers (short name, pull tag).
//! - **`operations`**: `ContainerApi`, the façade sequencing run/stop/list.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::docker::{self, BollardDaemon, ContainerApi};
//!
//! let daemon = BollardDaemon::new(docker::connect_docker(&cfg.daemon)?);
//! let api = ContainerApi::new(&daemon, cfg.daemon.wait_timeout());
//! for container in api.list().await? {
//!     println!("{}", container.id);
//! }
//! daemon.close();
//! ```
//!

/// The daemon boundary trait and its data types.
pub mod client;
/// Establishes the connection to the Docker daemon.
pub mod connect;
/// bollard-backed implementation of the daemon boundary.
pub mod daemon;
/// Image reference string helpers.
pub mod naming;
/// The container façade.
pub mod operations;

#[cfg(test)]
pub mod mock;

pub use client::DaemonClient;
pub use connect::connect_docker;
pub use daemon::BollardDaemon;
pub use operations::ContainerApi;
