//! Error type of the CLI.

use std::io;

use thiserror::Error;

use abgraph::AbGraphError;

use crate::description::DescriptionError;

/// Everything [`crate::run`] can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AbGraphError),

    /// The description could not be loaded; `src` is its text, for snippets.
    #[error("{err}")]
    Description { err: DescriptionError, src: String },
}

impl CliError {
    pub fn new_description_error(err: DescriptionError, src: impl Into<String>) -> Self {
        Self::Description {
            err,
            src: src.into(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::App(AbGraphError::Io(err))
    }
}
