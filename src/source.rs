//! Line source: the significant lines of an input file.
//!
//! Lines are trimmed; blank lines and lines starting with `#` are skipped. Numbers are
//! 1-based physical line numbers in the original text.

use crate::error::CompileError;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub number: usize,
}

#[derive(Debug, Clone)]
pub struct LineSource {
    text: String,
    /// Byte offset of the next unread physical line.
    offset: usize,
    /// Number of physical lines consumed so far.
    consumed: usize,
}

impl LineSource {
    pub fn new(text: impl Into<String>) -> Self {
        LineSource {
            text: text.into(),
            offset: 0,
            consumed: 0,
        }
    }

    /// Read the whole file up front; the handle is released before parsing starts.
    pub fn from_path(path: &Path) -> Result<Self, CompileError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| CompileError::io("read", path, e))?;
        Ok(LineSource::new(text))
    }

    /// Next significant line, or `None` at end of input.
    pub fn next_line(&mut self) -> Option<Line> {
        loop {
            if self.offset >= self.text.len() {
                return None;
            }
            let rest = &self.text[self.offset..];
            let (raw, advance) = match rest.find('\n') {
                Some(i) => (&rest[..i], i + 1),
                None => (rest, rest.len()),
            };
            self.offset += advance;
            self.consumed += 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Some(Line {
                text: trimmed.to_string(),
                number: self.consumed,
            });
        }
    }

    /// Line number of the last physical line read, used to locate end-of-input diagnostics.
    pub fn last_line_number(&self) -> usize {
        self.consumed
    }

    /// Restart from the first line.
    pub fn rewind(&mut self) {
        self.offset = 0;
        self.consumed = 0;
    }
}
