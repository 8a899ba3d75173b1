//! Compilation errors. Every error is fatal; the first one aborts the run.

use std::path::PathBuf;

/// Coarse classification of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Version,
    UnknownVariable,
    Type,
    Range,
    Length,
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("Line {line}: {message}")]
    Version { line: usize, message: String },
    #[error("Line {line}: Unknown variable {name}")]
    UnknownVariable { line: usize, name: String },
    #[error("Line {line}: Bad integer value {value}")]
    Type { line: usize, value: String },
    #[error("Line {line}: Out of range for {name}: {value} (allowed {min}..={max})")]
    Range {
        line: usize,
        name: String,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("Line {line}: String too long for {name}: {len} bytes (max {max})")]
    Length {
        line: usize,
        name: String,
        len: usize,
        max: usize,
    },
    #[error("Line {line}: $HOME not defined for tilde expansion")]
    HomeUnset { line: usize },
    #[error("Line {line}: Could not read {}: {source}", .path.display())]
    Indirect {
        line: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Codegen: {0}")]
    Codegen(#[from] CodegenError),
}

/// Errors raised while laying out records. The parser rejects everything that would trigger
/// these, so they only surface for hand-built programs.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("string for slot {slot} is {len} bytes, exceeds 16-bit length field")]
    StringTooLong { slot: u8, len: usize },
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Syntax { .. } => ErrorKind::Syntax,
            CompileError::Version { .. } => ErrorKind::Version,
            CompileError::UnknownVariable { .. } => ErrorKind::UnknownVariable,
            CompileError::Type { .. } => ErrorKind::Type,
            CompileError::Range { .. } => ErrorKind::Range,
            CompileError::Length { .. } | CompileError::Codegen(_) => ErrorKind::Length,
            CompileError::HomeUnset { .. }
            | CompileError::Indirect { .. }
            | CompileError::Io { .. } => ErrorKind::Io,
        }
    }

    /// 1-based line number of the offending input line, if the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::Syntax { line, .. }
            | CompileError::Version { line, .. }
            | CompileError::UnknownVariable { line, .. }
            | CompileError::Type { line, .. }
            | CompileError::Range { line, .. }
            | CompileError::Length { line, .. }
            | CompileError::HomeUnset { line }
            | CompileError::Indirect { line, .. } => Some(*line),
            CompileError::Io { .. } | CompileError::Codegen(_) => None,
        }
    }

    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        CompileError::Syntax {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn version(line: usize, message: impl Into<String>) -> Self {
        CompileError::Version {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompileError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
