//! # Dockrun Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the command handlers and the Docker layer:
//! - `config`: Settings loading, merging, and validation
//! - `error`: Error types and the stage tags attached to daemon failures
//!
pub mod config;
pub mod error;
