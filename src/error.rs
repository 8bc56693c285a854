//! Error types for the window transform and its I/O boundary.

use crate::streaming::RingError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the window transform.
#[derive(Error, Debug)]
pub enum SlideError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{}: {source}", .path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("read error: {0}")]
    Read(io::Error),

    #[error("{}: {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    OpenOutput { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Ring(#[from] RingError),

    #[error("invalid window size '{0}' (expected an integer N >= 1)")]
    InvalidWindow(String),
}

pub type Result<T> = std::result::Result<T, SlideError>;

impl SlideError {
    /// True for errors that only affect one input source.
    pub fn is_per_source(&self) -> bool {
        matches!(
            self,
            SlideError::OpenInput { .. } | SlideError::ReadInput { .. }
        )
    }

    /// True when the output was closed by its reader.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, SlideError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}
