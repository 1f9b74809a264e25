// schemer-vm - Stack-based bytecode virtual machine for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Stack push handlers: pushb, pushc, pushi, pushd, pushs, cons, dup.

use crate::vm::{Result, Vm};

impl Vm<'_> {
    /// pushb / pushc: both push their single operand byte.
    pub(crate) fn op_push_byte(&mut self) -> Result<()> {
        let value = self.read_u8()?;
        self.stack.push_byte(value);
        Ok(())
    }

    pub(crate) fn op_pushi(&mut self) -> Result<()> {
        let value = self.read_i64()?;
        self.stack.push_int(value);
        Ok(())
    }

    pub(crate) fn op_pushd(&mut self) -> Result<()> {
        let value = self.read_f64()?;
        self.stack.push_double(value);
        Ok(())
    }

    /// pushs: decode the UTF-8 operand up to and including its null
    /// terminator, then push it with its length word on top.
    pub(crate) fn op_pushs(&mut self) -> Result<()> {
        let bytes = self.read_string_operand()?;
        self.stack.push_string(&bytes);
        Ok(())
    }

    pub(crate) fn op_cons(&mut self) -> Result<()> {
        self.stack.push_empty_cell();
        Ok(())
    }

    pub(crate) fn op_dup(&mut self) -> Result<()> {
        self.stack.dup()
    }

    /// Read the string operand one code point at a time. The upper nibble
    /// of a non-ASCII lead byte gives the sequence length: 0xC is 2 bytes,
    /// 0xE is 3, anything else is taken as 4.
    fn read_string_operand(&mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        loop {
            let first = self.read_u8()?;
            if first & 0x80 == 0 || first == 0 {
                // ASCII, or the terminating null
                bytes.push(first);
                if first == 0 {
                    return Ok(bytes);
                }
                continue;
            }
            let codepoint_len: usize = match first >> 4 {
                0xC => 2,
                0xE => 3,
                _ => 4,
            };
            bytes.push(first);
            for _ in 0..codepoint_len - 1 {
                bytes.push(self.read_u8()?);
            }
        }
    }
}
