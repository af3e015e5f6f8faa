//! Error types for abgraph operations.
//!
//! [`AbGraphError`] is the single error type surfaced to callers. Layering
//! itself never fails on malformed connectivity; only invalid model state,
//! configuration and I/O problems reach the caller.

use std::io;

use thiserror::Error;

use abgraph_core::error::ModelError;

/// The main error type for abgraph operations.
#[derive(Debug, Error)]
pub enum AbGraphError {
    #[error("Invalid antibody model: {0}")]
    Model(#[from] ModelError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),
}
