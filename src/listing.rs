//! Human-readable listing of the records a program compiles to.
//!
//! One line per record: byte offset, mnemonic, operands. Built from the [`Program`], in the
//! same order and with the same offsets as [`crate::codegen::generate`] produces.

use crate::ast::{Program, Statement};
use crate::codegen::Opcode;
use crate::registry::Registry;
use std::fmt::{self, Write};

/// String payloads longer than this are cut short in the preview.
const PREVIEW_LEN: usize = 32;

/// Render the listing into a `String`.
pub fn render(program: &Program, registry: &Registry) -> String {
    let mut out = String::new();
    // Formatting into a String cannot fail.
    let _ = render_into(&mut out, program, registry);
    out
}

pub fn render_into(
    out: &mut impl Write,
    program: &Program,
    registry: &Registry,
) -> fmt::Result {
    let mut offset = 0usize;

    writeln!(
        out,
        "{:06x}  {:<5} version={} clear={}",
        offset,
        Opcode::Start.mnemonic(),
        program.version,
        program.clear as u8
    )?;
    offset += 5;

    for stmt in &program.statements {
        let name = registry.name_of(stmt.kind(), stmt.slot()).unwrap_or("?");
        match stmt {
            Statement::SetInt { slot, value } => writeln!(
                out,
                "{:06x}  {:<5} {}[{}] = {}",
                offset,
                Opcode::SetInt.mnemonic(),
                name,
                slot,
                value
            )?,
            Statement::SetString { slot, bytes } => {
                write!(
                    out,
                    "{:06x}  {:<5} {}[{}] len={} \"",
                    offset,
                    Opcode::SetString.mnemonic(),
                    name,
                    slot,
                    bytes.len()
                )?;
                write_preview(out, bytes)?;
                writeln!(out, "\"")?;
            }
        }
        offset += stmt.encoded_len();
    }

    writeln!(
        out,
        "{:06x}  {:<5} save={}",
        offset,
        Opcode::Stop.mnemonic(),
        program.save as u8
    )
}

/// Printable ASCII kept, everything else escaped; long payloads truncated with `...`.
fn write_preview(out: &mut impl Write, bytes: &[u8]) -> fmt::Result {
    for &b in bytes.iter().take(PREVIEW_LEN) {
        match b {
            b'"' => out.write_str("\\\"")?,
            b'\\' => out.write_str("\\\\")?,
            b'\n' => out.write_str("\\n")?,
            0x20..=0x7e => out.write_char(b as char)?,
            _ => write!(out, "\\x{:02x}", b)?,
        }
    }
    if bytes.len() > PREVIEW_LEN {
        out.write_str("...")?;
    }
    Ok(())
}
