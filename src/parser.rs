//! Parse configuration source into a [`Program`].
//!
//! Line shapes (preamble, `set`) are recognised with a PEST grammar. Statement order
//! (preamble, optional `clear`, `set`*, `save`/`end`) is enforced here, one line at a time.
//! The first error aborts; there is no recovery.

use crate::ast::{Program, Statement, Version};
use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::registry::{Registry, VarKind, VariableDescriptor, MAX_STRING_LENGTH, SNAPPYSENSE};
use crate::source::{Line, LineSource};
use pest::Parser;
use std::fs::File;
use std::io::Read;
use pest_derive::Parser as PestParser;
use tracing::debug;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct LineParser;

const PREAMBLE_KEYWORD: &str = "snappysense-compiled-config";

/// Parse source text with the SnappySense registry.
pub fn parse(source: &str, config: &CompilerConfig) -> Result<Program, CompileError> {
    ConfigParser::new(&SNAPPYSENSE, config).parse(&mut LineSource::new(source))
}

/// A `set` value before kind checking: inline text, or the bytes of an indirect file.
enum RawValue<'s> {
    Inline(&'s str),
    File(Vec<u8>),
}

pub struct ConfigParser<'a> {
    registry: &'a Registry,
    config: &'a CompilerConfig,
}

impl<'a> ConfigParser<'a> {
    pub fn new(registry: &'a Registry, config: &'a CompilerConfig) -> Self {
        ConfigParser { registry, config }
    }

    pub fn parse(&self, source: &mut LineSource) -> Result<Program, CompileError> {
        let first = source
            .next_line()
            .ok_or_else(|| CompileError::syntax(source.last_line_number(), "Empty program"))?;
        let version = parse_preamble(&first)?;
        if version != Version::SUPPORTED {
            return Err(CompileError::version(
                first.number,
                format!("Unknown version {}", version),
            ));
        }
        let mut program = Program::new(version);

        let mut line = source.next_line();
        if matches!(&line, Some(l) if l.text == "clear") {
            program.clear = true;
            line = source.next_line();
        }

        loop {
            let Some(current) = line else {
                return Err(CompileError::syntax(
                    source.last_line_number(),
                    "Requires `end` or `save`",
                ));
            };
            match current.text.as_str() {
                "save" => {
                    program.save = true;
                    break;
                }
                "end" => break,
                _ => {}
            }
            program.statements.push(self.parse_set(&current)?);
            line = source.next_line();
        }

        if let Some(extra) = source.next_line() {
            return Err(CompileError::syntax(
                extra.number,
                format!("Input follows `end` or `save`: {}", extra.text),
            ));
        }
        Ok(program)
    }

    fn parse_set(&self, line: &Line) -> Result<Statement, CompileError> {
        let pairs = LineParser::parse(Rule::set_stmt, &line.text).map_err(|_| {
            if line.text.starts_with("set") {
                CompileError::syntax(line.number, format!("Bad syntax for set: {}", line.text))
            } else {
                CompileError::syntax(
                    line.number,
                    format!("Illegal statement in this context: {}", line.text),
                )
            }
        })?;
        let mut name = "";
        let mut raw = "";
        for pair in pairs.flatten() {
            match pair.as_rule() {
                Rule::name => name = pair.as_str(),
                Rule::value => raw = pair.as_str(),
                _ => {}
            }
        }

        let var = self
            .registry
            .lookup(name)
            .ok_or_else(|| CompileError::UnknownVariable {
                line: line.number,
                name: name.to_string(),
            })?;
        let value = self.resolve_value(var, raw, line.number)?;
        let stmt = match var.kind {
            VarKind::Integer => self.integer_statement(var, value, line.number)?,
            VarKind::String => string_statement(var, value, line.number)?,
        };
        debug!(line = line.number, name = var.name, slot = var.slot, "set");
        Ok(stmt)
    }

    /// Strip quotes and follow `@` indirection. Indirect files are read at most one byte past
    /// the string limit.
    fn resolve_value<'s>(
        &self,
        var: VariableDescriptor,
        raw: &'s str,
        line: usize,
    ) -> Result<RawValue<'s>, CompileError> {
        let (indirect, text) = match raw.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let text = match text.strip_prefix('"') {
            Some(quoted) => quoted
                .strip_suffix('"')
                .ok_or_else(|| CompileError::syntax(line, format!("Bad value: {}", raw)))?,
            None => text,
        };
        if !indirect {
            return Ok(RawValue::Inline(text));
        }

        if text.is_empty() {
            return Err(CompileError::syntax(line, "Empty filename"));
        }
        let path = self
            .config
            .expand_tilde(text)
            .ok_or(CompileError::HomeUnset { line })?;
        let indirect_err = |source: std::io::Error| CompileError::Indirect {
            line,
            path: path.clone(),
            source,
        };
        let file = File::open(&path).map_err(&indirect_err)?;
        let mut bytes = Vec::new();
        file.take(MAX_STRING_LENGTH as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(&indirect_err)?;
        if bytes.len() > MAX_STRING_LENGTH {
            return Err(CompileError::Length {
                line,
                name: var.name.to_string(),
                len: bytes.len(),
                max: MAX_STRING_LENGTH,
            });
        }
        debug!(line, path = %path.display(), len = bytes.len(), "read indirect value");
        Ok(RawValue::File(bytes))
    }

    fn integer_statement(
        &self,
        var: VariableDescriptor,
        value: RawValue<'_>,
        line: usize,
    ) -> Result<Statement, CompileError> {
        let parsed = match &value {
            RawValue::Inline(s) => s.parse::<i32>().ok(),
            RawValue::File(bytes) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.trim().parse::<i32>().ok()),
        };
        let value = parsed.ok_or_else(|| CompileError::Type {
            line,
            value: match value {
                RawValue::Inline(s) => s.to_string(),
                RawValue::File(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
            },
        })?;
        if let Some(limit) = self.registry.limit_for(var.slot) {
            if !limit.contains(value) {
                return Err(CompileError::Range {
                    line,
                    name: var.name.to_string(),
                    value,
                    min: limit.min,
                    max: limit.max,
                });
            }
        }
        Ok(Statement::SetInt {
            slot: var.slot,
            value,
        })
    }
}

fn string_statement(
    var: VariableDescriptor,
    value: RawValue<'_>,
    line: usize,
) -> Result<Statement, CompileError> {
    let bytes = match value {
        RawValue::Inline(s) => s.as_bytes().to_vec(),
        RawValue::File(bytes) => bytes,
    };
    if bytes.len() > MAX_STRING_LENGTH {
        return Err(CompileError::Length {
            line,
            name: var.name.to_string(),
            len: bytes.len(),
            max: MAX_STRING_LENGTH,
        });
    }
    Ok(Statement::SetString {
        slot: var.slot,
        bytes,
    })
}

fn parse_preamble(line: &Line) -> Result<Version, CompileError> {
    let pairs = match LineParser::parse(Rule::preamble, &line.text) {
        Ok(pairs) => pairs,
        Err(_) if line.text.starts_with(PREAMBLE_KEYWORD) => {
            return Err(CompileError::syntax(
                line.number,
                format!("Bad syntax for `{}`: {}", PREAMBLE_KEYWORD, line.text),
            ))
        }
        Err(_) => {
            return Err(CompileError::syntax(
                line.number,
                format!("First statement must be `{}`", PREAMBLE_KEYWORD),
            ))
        }
    };
    let mut parts = [0u8; 3];
    let digits = pairs.flatten().filter(|p| p.as_rule() == Rule::digits);
    for (part, pair) in parts.iter_mut().zip(digits) {
        *part = pair.as_str().parse::<u8>().map_err(|_| {
            CompileError::version(line.number, format!("Bad version value: {}", line.text))
        })?;
    }
    Ok(Version(parts[0], parts[1], parts[2]))
}
