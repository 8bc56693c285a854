//! Sliding window transform: "head -c N, then shift one byte".
//!
//! For every byte read, the byte is appended to a ring buffer of capacity N.
//! Once the buffer is full its contents are written as one line and the
//! oldest byte is dropped. An input of L bytes therefore yields
//! `max(0, L - N + 1)` lines of exactly N bytes each.
//!
//! # Multiple sources
//!
//! All sources of a run share one buffer by default, so they behave like a
//! single concatenated stream and a window may straddle two sources. With
//! `reset_per_source` the buffer is cleared before each source instead.
//!
//! # Memory Complexity
//!
//! O(N) for the window plus fixed-size I/O buffers.

use crate::config::Config;
use crate::error::{Result, SlideError};
use crate::source::Source;
use crate::streaming::buffers::{output_buffer_size, DEFAULT_INPUT_BUFFER, DEFAULT_WINDOW};
use crate::streaming::{RingBuffer, WindowWriter};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

/// Sliding window command configuration.
#[derive(Debug, Clone)]
pub struct SlideCommand {
    /// Window size N (bytes per emitted line)
    pub window: usize,
    /// Clear the window at every source boundary
    pub reset_per_source: bool,
}

impl Default for SlideCommand {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl SlideCommand {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            reset_per_source: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            window: config.window,
            reset_per_source: config.reset_per_source,
        }
    }

    /// Allocate the window buffer for this command.
    pub fn window_buffer(&self) -> Result<RingBuffer<u8>> {
        Ok(RingBuffer::with_capacity(self.window)?)
    }

    /// Core loop: feed every byte of `input` through `ring`, writing each
    /// full window to `output`.
    ///
    /// The ring keeps whatever partial window remains at EOF, so calling
    /// this again with the next source continues the same stream.
    /// Returns the number of bytes consumed. Failures reading `input` come
    /// back as [`SlideError::Read`]; failures writing `output` as
    /// [`SlideError::Io`].
    pub fn slide<R: BufRead + ?Sized, W: Write>(
        &self,
        ring: &mut RingBuffer<u8>,
        input: &mut R,
        output: &mut WindowWriter<W>,
    ) -> Result<u64> {
        let mut consumed: u64 = 0;

        loop {
            let chunk = match input.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SlideError::Read(e)),
            };
            if chunk.is_empty() {
                break;
            }

            for &byte in chunk {
                let pushed = ring.push(byte);
                debug_assert!(pushed, "window full before push");
                if ring.is_full() {
                    output.write_window(ring)?;
                    ring.pop();
                }
            }

            let n = chunk.len();
            input.consume(n);
            consumed += n as u64;
        }

        Ok(consumed)
    }

    /// Run over a single reader.
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<SlideStats> {
        let mut ring = self.window_buffer()?;
        let mut writer = WindowWriter::with_capacity(output_buffer_size(self.window), output);
        let mut reader = BufReader::with_capacity(DEFAULT_INPUT_BUFFER, input);

        let bytes_read = self.slide(&mut ring, &mut reader, &mut writer)?;
        writer.flush()?;

        Ok(SlideStats {
            sources: 1,
            failed_sources: 0,
            bytes_read,
            lines_written: writer.lines_written(),
        })
    }

    /// Run over several operands in order, writing to one output.
    ///
    /// A source that cannot be opened or read is passed to `report`, counted
    /// in [`SlideStats::failed_sources`] and skipped; the remaining sources
    /// continue with the same window. Write errors abort the run.
    pub fn run_sources<W, F>(
        &self,
        operands: &[PathBuf],
        output: W,
        mut report: F,
    ) -> Result<SlideStats>
    where
        W: Write,
        F: FnMut(SlideError),
    {
        let mut ring = self.window_buffer()?;
        let mut writer = WindowWriter::with_capacity(output_buffer_size(self.window), output);
        let mut stats = SlideStats::default();

        for operand in operands {
            let source = Source::from_operand(operand);
            stats.sources += 1;

            let mut reader = match source.open() {
                Ok(reader) => reader,
                Err(e) if e.is_per_source() => {
                    log::debug!("skipping {}", source);
                    stats.failed_sources += 1;
                    report(e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if self.reset_per_source {
                ring.clear();
            }

            let before = writer.lines_written();
            let bytes = match self.slide(&mut ring, &mut *reader, &mut writer) {
                Ok(bytes) => bytes,
                Err(SlideError::Read(source)) => {
                    log::debug!("read failed on {}", operand.display());
                    stats.failed_sources += 1;
                    report(SlideError::ReadInput {
                        path: operand.clone(),
                        source,
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };
            log::debug!(
                "{}: {} bytes, {} lines",
                source,
                bytes,
                writer.lines_written() - before
            );
            stats.bytes_read += bytes;
        }

        writer.flush()?;
        stats.lines_written = writer.lines_written();
        ring.finalize();

        Ok(stats)
    }
}

/// Statistics from a window run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideStats {
    pub sources: usize,
    pub failed_sources: usize,
    pub bytes_read: u64,
    pub lines_written: u64,
}

impl SlideStats {
    /// True when every source was opened and read to the end.
    pub fn all_sources_ok(&self) -> bool {
        self.failed_sources == 0
    }
}

impl std::fmt::Display for SlideStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sources: {} ({} failed), Bytes: {}, Lines: {}",
            self.sources, self.failed_sources, self.bytes_read, self.lines_written
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use tempfile::NamedTempFile;

    fn slide(window: usize, input: &[u8]) -> Vec<u8> {
        let mut output = Vec::new();
        SlideCommand::new(window).run(input, &mut output).unwrap();
        output
    }

    fn temp_input(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_basic_window() {
        assert_eq!(slide(3, b"ABCD"), b"ABC\nBCD\n");
    }

    #[test]
    fn test_input_shorter_than_window() {
        assert_eq!(slide(4, b"ABC"), b"");
    }

    #[test]
    fn test_input_equal_to_window() {
        assert_eq!(slide(5, b"hello"), b"hello\n");
    }

    #[test]
    fn test_window_of_one() {
        assert_eq!(slide(1, b"xyz"), b"x\ny\nz\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(slide(1, b""), b"");
    }

    #[test]
    fn test_default_window_is_eight() {
        let mut output = Vec::new();
        let stats = SlideCommand::default()
            .run(&b"0123456789"[..], &mut output)
            .unwrap();
        assert_eq!(output, b"01234567\n12345678\n23456789\n");
        assert_eq!(stats.lines_written, 3);
        assert_eq!(stats.bytes_read, 10);
    }

    #[test]
    fn test_newlines_and_binary_pass_through() {
        assert_eq!(slide(2, b"a\n\x00"), b"a\n\n\n\x00\n");
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = SlideCommand::new(0).run(&b"abc"[..], Vec::new()).unwrap_err();
        assert!(matches!(err, SlideError::Ring(_)));
    }

    #[test]
    fn test_sources_share_window() {
        let a = temp_input(b"AB");
        let b = temp_input(b"CD");
        let mut output = Vec::new();

        let stats = SlideCommand::new(2)
            .run_sources(
                &[a.path().to_path_buf(), b.path().to_path_buf()],
                &mut output,
                |e| panic!("unexpected error: {}", e),
            )
            .unwrap();

        assert_eq!(output, b"AB\nBC\nCD\n");
        assert_eq!(stats.sources, 2);
        assert_eq!(stats.bytes_read, 4);
        assert_eq!(stats.lines_written, 3);
        assert!(stats.all_sources_ok());
    }

    #[test]
    fn test_reset_per_source() {
        let a = temp_input(b"AB");
        let b = temp_input(b"CD");
        let mut cmd = SlideCommand::new(2);
        cmd.reset_per_source = true;
        let mut output = Vec::new();

        cmd.run_sources(
            &[a.path().to_path_buf(), b.path().to_path_buf()],
            &mut output,
            |e| panic!("unexpected error: {}", e),
        )
        .unwrap();

        assert_eq!(output, b"AB\nCD\n");
    }

    #[test]
    fn test_short_sources_accumulate() {
        let a = temp_input(b"A");
        let b = temp_input(b"B");
        let c = temp_input(b"C");
        let mut output = Vec::new();

        SlideCommand::new(3)
            .run_sources(
                &[
                    a.path().to_path_buf(),
                    b.path().to_path_buf(),
                    c.path().to_path_buf(),
                ],
                &mut output,
                |e| panic!("unexpected error: {}", e),
            )
            .unwrap();

        assert_eq!(output, b"ABC\n");
    }

    #[test]
    fn test_missing_source_skipped() {
        let a = temp_input(b"AB");
        let b = temp_input(b"CD");
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut reported = Vec::new();
        let mut output = Vec::new();

        let stats = SlideCommand::new(2)
            .run_sources(
                &[a.path().to_path_buf(), missing.clone(), b.path().to_path_buf()],
                &mut output,
                |e| reported.push(e.to_string()),
            )
            .unwrap();

        assert_eq!(output, b"AB\nBC\nCD\n");
        assert_eq!(stats.sources, 3);
        assert_eq!(stats.failed_sources, 1);
        assert!(!stats.all_sources_ok());
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains("missing"));
    }

    #[test]
    fn test_unreadable_source_skipped() {
        // A directory opens but fails on read
        let a = temp_input(b"AB");
        let b = temp_input(b"CD");
        let dir = tempfile::tempdir().unwrap();
        let mut reported = Vec::new();
        let mut output = Vec::new();

        let stats = SlideCommand::new(2)
            .run_sources(
                &[
                    a.path().to_path_buf(),
                    dir.path().to_path_buf(),
                    b.path().to_path_buf(),
                ],
                &mut output,
                |e| reported.push(e),
            )
            .unwrap();

        assert_eq!(output, b"AB\nBC\nCD\n");
        assert_eq!(stats.sources, 3);
        assert_eq!(stats.failed_sources, 1);
        assert_eq!(stats.bytes_read, 4);
        assert_eq!(reported.len(), 1);
        assert!(reported[0].is_per_source());
        assert!(matches!(
            &reported[0],
            SlideError::ReadInput { path, .. } if path == dir.path()
        ));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_read_and_write_errors_distinct() {
        let read_err = SlideCommand::new(2)
            .run(FailingReader, Vec::new())
            .unwrap_err();
        assert!(matches!(read_err, SlideError::Read(_)));

        let write_err = SlideCommand::new(2)
            .run(&b"ABC"[..], FailingWriter)
            .unwrap_err();
        assert!(matches!(write_err, SlideError::Io(_)));
    }

    #[test]
    fn test_stats_display() {
        let stats = SlideStats {
            sources: 2,
            failed_sources: 1,
            bytes_read: 10,
            lines_written: 7,
        };
        assert_eq!(
            stats.to_string(),
            "Sources: 2 (1 failed), Bytes: 10, Lines: 7"
        );
    }

    #[test]
    fn test_window_properties_random() {
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..200 {
            let window = rng.gen_range(1..=12);
            let len: usize = rng.gen_range(0..=40);
            let input: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

            let output = slide(window, &input);
            let expected_lines = (len + 1).saturating_sub(window);
            assert_eq!(output.len(), expected_lines * (window + 1));

            // Each line is the N most recent bytes, oldest first
            for (i, line) in output.chunks(window + 1).enumerate() {
                assert_eq!(&line[..window], &input[i..i + window]);
                assert_eq!(line[window], b'\n');
            }

            // Same input, same output
            assert_eq!(slide(window, &input), output);
        }
    }
}
