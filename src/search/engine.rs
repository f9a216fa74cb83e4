//! Forward line search powered by ripgrep's regex matcher.
//!
//! The searcher compiles the pattern once per call and walks decoded lines in increasing
//! ordinal order, returning the first line that contains a match anywhere. There is no
//! wraparound, no backward search and no cross-call pattern cache.

use crate::error::{Result, TailError};
use crate::file_handler::LineIndex;
use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use std::io::{Read, Seek};

/// Options that influence how a pattern is compiled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Match letters regardless of case (off by default, matching the regex engine)
    pub case_insensitive: bool,
}

/// Forward regex search over the lines of a [`LineIndex`]
#[derive(Debug, Clone, Default)]
pub struct LineSearcher {
    options: SearchOptions,
}

impl LineSearcher {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Compile `pattern` with the configured options
    ///
    /// # Errors
    /// * `InvalidPattern` if the regex does not parse
    pub fn compile(&self, pattern: &str) -> Result<RegexMatcher> {
        RegexMatcherBuilder::new()
            .case_insensitive(self.options.case_insensitive)
            .build(pattern)
            .map_err(|e| TailError::invalid_pattern(pattern, e.to_string()))
    }

    /// Find the first line at or after `start` that matches `pattern`
    ///
    /// # Returns
    /// * `Some(line)` for the first matching ordinal
    /// * `None` if no line in `[start, line_count)` matches, including when `start` is
    ///   already past the last line
    ///
    /// # Errors
    /// * `InvalidPattern` before any line is read
    /// * Any read or decode error raised by the line being inspected
    pub fn search<R: Read + Seek>(
        &self,
        index: &mut LineIndex<R>,
        start: u64,
        pattern: &str,
    ) -> Result<Option<u64>> {
        let matcher = self.compile(pattern)?;

        for line in start..index.line_count() {
            let text = index.get_line(line)?;
            let found = matcher
                .is_match(text.as_bytes())
                .map_err(|e| TailError::other(e.to_string()))?;
            if found {
                log::debug!("Pattern '{}' matched line {}", pattern, line);
                return Ok(Some(line));
            }
        }

        Ok(None)
    }
}
