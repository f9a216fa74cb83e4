//! Byte-offset line index and single-line reader
//!
//! This module provides the LineIndex structure that scans a file once, records where every
//! line starts, and then serves individual lines on demand by seeking to the recorded offset.
//! Newlines are located with memchr while the file is streamed in fixed-size chunks.
//!
//! There is no line cache: every `get_line` call issues one seek and one read.

use crate::error::{Result, TailError};
use crate::file_handler::validation::validate_file_path;
use memchr::memchr_iter;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

/// Size of the buffer used while scanning for line boundaries
pub const SCAN_CHUNK_SIZE: usize = 4096;

/// Random-access index over the line boundaries of a single file
///
/// The index owns its byte source for the whole session; dropping the index releases the
/// file handle on every exit path.
#[derive(Debug)]
pub struct LineIndex<R = File> {
    /// Read-only byte source the offsets were computed from
    source: R,

    /// Byte offsets where each line starts
    ///
    /// - line_offsets[0] = 0 (first line always starts at byte 0)
    /// - line_offsets[n] = byte position after the nth newline
    /// - the last entry is a sentinel one past the last content byte
    /// - Length of this vector - 1 = number of lines
    line_offsets: Vec<u64>,
}

impl LineIndex<File> {
    /// Open `path` read-only and build the index immediately
    ///
    /// # Errors
    /// * `FileNotFound`, `NotAFile`, `PermissionDenied` when the path cannot be opened
    /// * `FileError` when the scan itself fails
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        validate_file_path(path)?;

        let file = File::open(path).map_err(|e| TailError::open_failed(path, e))?;
        let index = Self::from_reader(file)?;

        log::debug!(
            "Indexed {}: {} lines",
            path.display(),
            index.line_count()
        );
        Ok(index)
    }
}

impl<R: Read + Seek> LineIndex<R> {
    /// Build an index over any seekable byte source
    ///
    /// The source is rewound to offset 0 before scanning.
    pub fn from_reader(mut source: R) -> Result<Self> {
        source
            .seek(SeekFrom::Start(0))
            .map_err(|e| TailError::file_error("Failed to rewind file", e))?;

        let line_offsets = scan_line_offsets(&mut source)?;
        Ok(Self {
            source,
            line_offsets,
        })
    }

    /// Number of lines in the file, O(1)
    pub fn line_count(&self) -> u64 {
        (self.line_offsets.len() - 1) as u64
    }

    /// All recorded line start offsets, including the trailing sentinel
    pub fn line_offsets(&self) -> &[u64] {
        &self.line_offsets
    }

    /// Byte range `[start, end)` of a line's content, newline excluded
    ///
    /// # Errors
    /// * `LineOutOfBounds` if `line >= line_count()`
    pub fn line_range(&self, line: u64) -> Result<(u64, u64)> {
        let line_count = self.line_count();
        if line >= line_count {
            log::error!("Line {} requested but only {} lines exist", line, line_count);
            return Err(TailError::LineOutOfBounds { line, line_count });
        }

        let idx = line as usize;
        let start = self.line_offsets[idx];
        let end = self.line_offsets[idx + 1] - 1;
        Ok((start, end))
    }

    /// Read the raw bytes of a line, newline excluded
    pub fn read_line_bytes(&mut self, line: u64) -> Result<Vec<u8>> {
        let (start, end) = self.line_range(line)?;

        self.source
            .seek(SeekFrom::Start(start))
            .map_err(|e| TailError::file_error(format!("Failed to seek to line {}", line), e))?;

        let mut buffer = vec![0u8; (end - start) as usize];
        self.source
            .read_exact(&mut buffer)
            .map_err(|e| TailError::file_error(format!("Failed to read line {}", line), e))?;

        Ok(buffer)
    }

    /// Read and decode a single line (0-based)
    ///
    /// # Errors
    /// * `LineOutOfBounds` if `line >= line_count()`; callers are expected to clamp first
    /// * `InvalidUtf8` if the line's bytes do not decode; no replacement is substituted
    /// * `FileError` if the seek or read fails
    pub fn get_line(&mut self, line: u64) -> Result<String> {
        let bytes = self.read_line_bytes(line)?;
        String::from_utf8(bytes).map_err(|e| TailError::InvalidUtf8 {
            line,
            source: e.utf8_error(),
        })
    }
}

/// Stream `source` from its current position and collect line start offsets
fn scan_line_offsets<R: Read>(source: &mut R) -> Result<Vec<u64>> {
    let mut offsets = vec![0u64];
    let mut chunk = [0u8; SCAN_CHUNK_SIZE];
    let mut position: u64 = 0;

    loop {
        let read = match source.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(TailError::file_error("Failed to scan file", e)),
        };

        offsets.extend(memchr_iter(b'\n', &chunk[..read]).map(|i| position + i as u64 + 1));
        position += read as u64;
    }

    // Close an unterminated final line
    let last = offsets[offsets.len() - 1];
    if position > last {
        offsets.push(position + 1);
    }

    Ok(offsets)
}
