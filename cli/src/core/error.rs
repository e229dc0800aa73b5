//! # Dockrun Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout dockrun. Every failure
//! the façade can hit is named by a `DockrunError` variant, and each variant
//! that corresponds to a daemon call is tagged with the stage it happened in
//! (pull, create, start, wait, logs, stop, list).
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `DockrunError`: A custom error enum using `thiserror` for specific error kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Stage variants are attached to the underlying daemon error as anyhow
//! *context*, so the rendered chain reads `pull image 'alpine': <daemon error>`
//! while callers can still recover the stage:
//!
//! ```rust
//! match err.downcast_ref::<DockrunError>() {
//!     Some(DockrunError::Pull { .. }) => println!("pull failed"),
//!     Some(other) => println!("other stage: {}", other),
//!     None => println!("untagged error"),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for dockrun.
#[derive(Error, Debug)]
pub enum DockrunError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to connect to Docker daemon. Is it running and accessible?")]
    Connect,

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("image not provided")]
    ImageNotProvided,

    #[error("command not provided")]
    EmptyCommand,

    #[error("pull image '{image}'")]
    Pull { image: String },

    #[error("create container from image '{image}'")]
    Create { image: String },

    #[error("start container '{id}'")]
    Start { id: String },

    #[error("wait for container '{id}'")]
    Wait { id: String },

    #[error("container '{id}' did not exit within {seconds}s")]
    WaitTimeout { id: String, seconds: u64 },

    #[error("read logs of container '{id}'")]
    Logs { id: String },

    #[error("stop container '{id}'")]
    Stop { id: String },

    #[error("list containers")]
    List,
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;

/// Returns the `DockrunError` tag attached anywhere in an error chain, if any.
///
/// Stage tags are attached as context on top of the daemon error; anyhow's
/// downcast looks through layers of context, so the outermost tag wins.
pub fn stage_of(err: &anyhow::Error) -> Option<&DockrunError> {
    err.downcast_ref::<DockrunError>()
}
