//! Input sources: standard input or a file path.

use crate::config::is_stdio;
use crate::error::{Result, SlideError};
use crate::streaming::buffers::DEFAULT_INPUT_BUFFER;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One byte-producing input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Interpret a command-line operand; `-` means standard input.
    pub fn from_operand<P: AsRef<Path>>(operand: P) -> Self {
        let path = operand.as_ref();
        if is_stdio(path) {
            Source::Stdin
        } else {
            Source::File(path.to_path_buf())
        }
    }

    /// Open the source for buffered sequential reading.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            Source::Stdin => Ok(Box::new(io::stdin().lock())),
            Source::File(path) => {
                let file = File::open(path).map_err(|source| SlideError::OpenInput {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::with_capacity(DEFAULT_INPUT_BUFFER, file)))
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => write!(f, "<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}
