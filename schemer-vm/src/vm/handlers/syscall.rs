// schemer-vm - Stack-based bytecode virtual machine for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Syscall handler: the print family and exit.

use crate::opcode::Syscall;
use crate::vm::{Result, Vm, VmFault};

impl Vm<'_> {
    pub(crate) fn op_syscall(&mut self) -> Result<()> {
        let code = self.read_u8()?;
        let syscall = Syscall::from_byte(code).ok_or(VmFault::UnknownSyscall(code))?;
        match syscall {
            Syscall::PrintBool => {
                let value = self.stack.pop_byte()?;
                let text = if value != 0 { "true" } else { "false" };
                self.console.write(text);
            }
            Syscall::PrintChar => {
                let value = self.stack.pop_byte()?;
                self.console.write(&char::from(value).to_string());
            }
            Syscall::PrintInt => {
                let value = self.stack.pop_int()?;
                self.console.write(&value.to_string());
            }
            Syscall::PrintDouble => {
                let value = self.stack.pop_double()?;
                self.console.write(&value.to_string());
            }
            Syscall::PrintString => {
                let bytes = self.stack.pop_string()?;
                self.console.write(&String::from_utf8_lossy(&bytes));
            }
            Syscall::Exit => {
                self.exit_code = self.stack.pop_int()?;
                self.finished = true;
            }
        }
        Ok(())
    }
}
