//! Buffer size constants for the streaming reader and writer.
//!
//! The window loop touches one byte at a time, so both ends go through
//! buffered I/O to keep syscalls proportional to data volume, not bytes.

/// Default output buffer size (256 KB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 256 * 1024;

/// Default input buffer size (64 KB).
pub const DEFAULT_INPUT_BUFFER: usize = 64 * 1024;

/// Window size used when `-n` is not given.
pub const DEFAULT_WINDOW: usize = 8;

/// Output buffer size for a given window.
///
/// Every emitted line is `window + 1` bytes, so very large windows get a
/// buffer that holds at least one full line.
#[inline]
pub const fn output_buffer_size(window: usize) -> usize {
    let line = window.saturating_add(1);
    if line > DEFAULT_OUTPUT_BUFFER {
        line
    } else {
        DEFAULT_OUTPUT_BUFFER
    }
}
