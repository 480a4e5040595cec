use std::path::PathBuf;

use thiserror::Error;

use crate::buffer::BufferError;

/// Failure of an [`Editor`](super::Editor) operation
#[derive(Debug, Error)]
pub enum EditError {
    /// A required path was empty
    #[error("{0} file path required")]
    MissingPath(&'static str),

    /// A byte count of zero where a positive one is required
    #[error("number of bytes required to {0}")]
    ZeroSize(&'static str),

    #[error("split address must not be zero")]
    SplitAtStart,

    #[error("failed to read binary file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: BufferError,
    },

    #[error("failed to write binary file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: BufferError,
    },

    /// Start address at or past the end of the data
    #[error(transparent)]
    Range(#[from] BufferError),

    /// The dump sink rejected output
    #[error("failed to write dump output")]
    Output(#[source] std::io::Error),
}
