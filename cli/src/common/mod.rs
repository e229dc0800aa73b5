//! # Dockrun Common Utilities
//!
//! File: cli/src/common/mod.rs
//!
//! Shared building blocks used by the command handlers. Currently this is
//! the Docker layer: the daemon client boundary and the container façade.
//!
pub mod docker;
