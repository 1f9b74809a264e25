// schemer-vm - Stack-based bytecode virtual machine for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic and comparison handlers: addi, cmpi, cmpd.

use super::ordering_byte;
use crate::vm::{Result, Vm};

impl Vm<'_> {
    /// addi: integer addition, wrapping on overflow.
    pub(crate) fn op_addi(&mut self) -> Result<()> {
        let y = self.stack.pop_int()?;
        let x = self.stack.pop_int()?;
        self.stack.push_int(x.wrapping_add(y));
        Ok(())
    }

    pub(crate) fn op_cmpi(&mut self) -> Result<()> {
        let y = self.stack.pop_int()?;
        let x = self.stack.pop_int()?;
        self.stack.push_byte(ordering_byte(x, y));
        Ok(())
    }

    pub(crate) fn op_cmpd(&mut self) -> Result<()> {
        let y = self.stack.pop_double()?;
        let x = self.stack.pop_double()?;
        self.stack.push_byte(ordering_byte(x, y));
        Ok(())
    }
}
