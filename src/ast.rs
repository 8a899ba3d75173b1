//! In-memory program built by the parser and consumed by the code generator.

use crate::registry::VarKind;
use std::fmt;

/// Configuration language version from the preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version(pub u8, pub u8, pub u8);

impl Version {
    /// The only version this compiler accepts.
    pub const SUPPORTED: Version = Version(1, 0, 0);

    pub fn bytes(&self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

/// One `set` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    SetInt { slot: u8, value: i32 },
    SetString { slot: u8, bytes: Vec<u8> },
}

impl Statement {
    pub fn slot(&self) -> u8 {
        match self {
            Statement::SetInt { slot, .. } | Statement::SetString { slot, .. } => *slot,
        }
    }

    pub fn kind(&self) -> VarKind {
        match self {
            Statement::SetInt { .. } => VarKind::Integer,
            Statement::SetString { .. } => VarKind::String,
        }
    }

    /// Size of the record this statement is encoded as.
    pub fn encoded_len(&self) -> usize {
        match self {
            Statement::SetInt { .. } => 6,
            Statement::SetString { bytes, .. } => 4 + bytes.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub version: Version,
    pub clear: bool,
    /// In input order; duplicates for the same variable are kept.
    pub statements: Vec<Statement>,
    pub save: bool,
}

impl Program {
    pub fn new(version: Version) -> Self {
        Program {
            version,
            clear: false,
            statements: Vec::new(),
            save: false,
        }
    }

    /// START + statements + STOP.
    pub fn encoded_len(&self) -> usize {
        5 + self
            .statements
            .iter()
            .map(Statement::encoded_len)
            .sum::<usize>()
            + 2
    }
}
