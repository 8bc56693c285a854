//! hcasl: "head -c N, then shift one byte" loop.
//!
//! For a window size N the tool prints the most recent N bytes of its input
//! as one line, drops the oldest byte, and repeats for every further byte,
//! without re-reading the source.
//!
//! # Features
//!
//! - **Fixed-capacity ring buffer**: O(1) push/pop, no reallocation
//! - **Streaming I/O**: constant memory regardless of input size
//! - **Multi-source runs**: sources are treated as one concatenated stream
//!
//! # Example
//!
//! ```rust
//! use hcasl::commands::SlideCommand;
//!
//! let mut output = Vec::new();
//! let stats = SlideCommand::new(3).run(&b"ABCD"[..], &mut output).unwrap();
//!
//! assert_eq!(output, b"ABC\nBCD\n");
//! assert_eq!(stats.lines_written, 2);
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod source;
pub mod streaming;

// Re-export commonly used types
pub use commands::{SlideCommand, SlideStats};
pub use config::{parse_window_size, Config};
pub use error::SlideError;
pub use source::Source;
pub use streaming::{RingBuffer, RingError, WindowWriter};
