//! Buffered window output.
//!
//! Each emitted window is written as raw bytes followed by a single `\n`.
//! No line-ending translation happens on any platform.

use crate::error::SlideError;
use crate::streaming::buffers::DEFAULT_OUTPUT_BUFFER;
use crate::streaming::RingBuffer;
use std::io::{BufWriter, Write};

/// Buffered writer for window lines.
pub struct WindowWriter<W: Write> {
    writer: BufWriter<W>,
    lines: u64,
}

impl<W: Write> WindowWriter<W> {
    /// Create a new WindowWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    /// Create a new WindowWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            lines: 0,
        }
    }

    /// Write the current ring contents, oldest first, followed by newline.
    #[inline]
    pub fn write_window(&mut self, window: &RingBuffer<u8>) -> Result<(), SlideError> {
        let (head, tail) = window.as_slices();
        self.writer.write_all(head)?;
        self.writer.write_all(tail)?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<(), SlideError> {
        self.writer.flush()?;
        Ok(())
    }
}
