//! # confcomp — SnappySense configuration compiler
//!
//! Translates the line-oriented configuration language (device identity, network credentials,
//! MQTT broker endpoint, operating intervals) into the compact binary blob the device reads at
//! boot.
//!
//! ## Language
//!
//! ```text
//! # comments and blank lines are ignored
//! snappysense-compiled-config 1.0.0
//! clear
//! set device-id "snappy-01"
//! set observation-interval 300
//! set mqtt-root-cert @~/certs/AmazonRootCA1.pem
//! save
//! ```
//!
//! - The first line declares the language version; only `1.0.0` is accepted.
//! - `clear` (optional, directly after the preamble) wipes stored settings first.
//! - `set NAME VALUE`: VALUE is a literal, a `"quoted"` string, or `@FILE` whose contents
//!   become the value. `~/` in FILE expands to `$HOME`.
//! - `save` or `end` finishes the program; `save` persists the settings on the device.
//!
//! ## Pipeline
//!
//! [`source::LineSource`] → [`parser::ConfigParser`] → [`ast::Program`] →
//! [`codegen::generate`] → [`sink::write_output`]. The first error aborts the run.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod error;
pub mod listing;
pub mod parser;
pub mod registry;
pub mod sink;
pub mod source;

pub use ast::{Program, Statement, Version};
pub use codegen::{generate, Opcode, OutputBuffer};
pub use config::CompilerConfig;
pub use error::{CodegenError, CompileError, ErrorKind};
pub use parser::{parse, ConfigParser};
pub use registry::{IntLimit, Registry, VarKind, VariableDescriptor, SNAPPYSENSE};
pub use source::{Line, LineSource};

use std::path::Path;
use tracing::info;

/// Parse and generate from a line source; nothing touches the output file.
pub fn compile(
    source: &mut LineSource,
    registry: &Registry,
    config: &CompilerConfig,
) -> Result<(Program, OutputBuffer), CompileError> {
    let program = ConfigParser::new(registry, config).parse(source)?;
    let out = generate(&program)?;
    info!(
        statements = program.statements.len(),
        len = out.len(),
        "compiled"
    );
    Ok((program, out))
}

/// Compile source text to bytes with the SnappySense registry.
pub fn compile_source(source: &str, config: &CompilerConfig) -> Result<Vec<u8>, CompileError> {
    let (_, out) = compile(&mut LineSource::new(source), &SNAPPYSENSE, config)?;
    Ok(out.into_bytes())
}

/// Compile `input` and write the blob to `output`. Returns the compiled program.
///
/// The output file is only created once compilation has fully succeeded.
pub fn compile_file(
    input: &Path,
    output: &Path,
    config: &CompilerConfig,
) -> Result<Program, CompileError> {
    let mut source = LineSource::from_path(input)?;
    let (program, out) = compile(&mut source, &SNAPPYSENSE, config)?;
    sink::write_output(output, out.as_bytes())?;
    Ok(program)
}
