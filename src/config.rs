//! Run configuration.
//!
//! A [`Config`] is built once from the command line and passed by reference
//! to everything that needs it. Nothing here is process-global.

use crate::error::SlideError;
use crate::streaming::buffers::DEFAULT_WINDOW;
use std::path::{Path, PathBuf};

/// Operand that denotes standard input or standard output.
pub const STDIO_OPERAND: &str = "-";

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Window size N, always >= 1.
    pub window: usize,
    /// Output destination, `-` for stdout.
    pub output: PathBuf,
    /// Input operands in processing order. Empty means stdin.
    pub inputs: Vec<PathBuf>,
    /// Clear the window before each source instead of carrying it over.
    pub reset_per_source: bool,
    /// Print run statistics to stderr.
    pub stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            output: PathBuf::from(STDIO_OPERAND),
            inputs: Vec::new(),
            reset_per_source: false,
            stats: false,
        }
    }
}

impl Config {
    /// Input operands, with an implicit `-` when none were given.
    pub fn sources(&self) -> Vec<PathBuf> {
        if self.inputs.is_empty() {
            vec![PathBuf::from(STDIO_OPERAND)]
        } else {
            self.inputs.clone()
        }
    }

    /// True when output goes to stdout.
    pub fn output_is_stdout(&self) -> bool {
        is_stdio(&self.output)
    }
}

/// True if `path` is the `-` operand.
#[inline]
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_OPERAND
}

/// Parse a window size.
///
/// Accepts the same integer syntax as C `strtol` with base 0: optional
/// leading whitespace and sign, `0x`/`0X` for hexadecimal, a leading `0`
/// for octal, decimal otherwise. The whole string must be consumed and the
/// value must be at least 1.
pub fn parse_window_size(s: &str) -> Result<usize, SlideError> {
    let invalid = || SlideError::InvalidWindow(s.to_string());

    let mut rest = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let (radix, digits) = if let Some(hex) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .filter(|h| h.as_bytes().first().is_some_and(u8::is_ascii_hexdigit))
    {
        (16, hex)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };

    if digits.is_empty() {
        return Err(invalid());
    }

    let mut value: usize = 0;
    for c in digits.chars() {
        let digit = c.to_digit(radix).ok_or_else(invalid)? as usize;
        value = value
            .checked_mul(radix as usize)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(invalid)?;
    }

    if negative || value == 0 {
        return Err(invalid());
    }
    Ok(value)
}
