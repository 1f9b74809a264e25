// schemer-vm - Stack-based bytecode virtual machine for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Control flow handlers: jmp, jne.

use crate::vm::{Result, Vm};

impl Vm<'_> {
    /// jmp: unconditional relative seek.
    pub(crate) fn op_jmp(&mut self) -> Result<()> {
        let offset = self.read_i64()?;
        self.seek(offset)
    }

    /// jne: pop a comparison result byte and seek if it is non-zero. The
    /// operand is consumed either way.
    pub(crate) fn op_jne(&mut self) -> Result<()> {
        let cmp_result = self.stack.pop_byte()?;
        let offset = self.read_i64()?;
        if cmp_result != 0 {
            self.seek(offset)?;
        }
        Ok(())
    }
}
