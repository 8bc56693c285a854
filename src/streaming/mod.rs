//! Streaming building blocks for the window transform.
//!
//! - Fixed-capacity ring buffer holding the sliding window
//! - Buffered window output
//! - Buffer size constants

pub mod buffers;
pub mod output;
pub mod ring_buffer;

pub use output::WindowWriter;
pub use ring_buffer::{RingBuffer, RingError};
