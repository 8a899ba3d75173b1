//! Emit the binary form of a [`Program`].
//!
//! Record layout (little-endian, no padding, no checksum):
//!
//! | Record | Bytes |
//! |--------|-------|
//! | START  | `01 v0 v1 v2 clear` |
//! | SETI   | `03 slot i32` |
//! | SETS   | `04 slot u16-length bytes...` |
//! | STOP   | `02 save` |
//!
//! Opcodes and slot numbers are fixed by the device firmware.

use crate::ast::{Program, Statement};
use crate::error::CodegenError;
use byteorder::{ByteOrder, LittleEndian};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Start = 1,
    Stop = 2,
    SetInt = 3,
    SetString = 4,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Start => "START",
            Opcode::Stop => "STOP",
            Opcode::SetInt => "SETI",
            Opcode::SetString => "SETS",
        }
    }
}

/// Append-only byte buffer the records are laid out in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    bytes: Vec<u8>,
}

impl OutputBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        OutputBuffer {
            bytes: Vec::with_capacity(capacity),
        }
    }

    fn op(&mut self, op: Opcode) {
        self.bytes.push(op as u8);
    }

    fn u8(&mut self, v: u8) {
        self.bytes.push(v);
    }

    fn u16(&mut self, v: u16) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, v);
        self.bytes.extend_from_slice(&buf);
    }

    fn i32(&mut self, v: i32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_i32(&mut buf, v);
        self.bytes.extend_from_slice(&buf);
    }

    fn raw(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Lay out START, one record per statement in order, then STOP.
pub fn generate(program: &Program) -> Result<OutputBuffer, CodegenError> {
    let mut out = OutputBuffer::with_capacity(program.encoded_len());

    out.op(Opcode::Start);
    out.raw(&program.version.bytes());
    out.u8(program.clear as u8);

    for stmt in &program.statements {
        match stmt {
            Statement::SetInt { slot, value } => {
                out.op(Opcode::SetInt);
                out.u8(*slot);
                out.i32(*value);
            }
            Statement::SetString { slot, bytes } => {
                let len = u16::try_from(bytes.len()).map_err(|_| CodegenError::StringTooLong {
                    slot: *slot,
                    len: bytes.len(),
                })?;
                out.op(Opcode::SetString);
                out.u8(*slot);
                out.u16(len);
                out.raw(bytes);
            }
        }
    }

    out.op(Opcode::Stop);
    out.u8(program.save as u8);
    Ok(out)
}
