// schemer-vm - Stack-based bytecode virtual machine for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Bytecode instruction definitions.
//!
//! The wire format is a flat byte sequence: one opcode byte followed by its
//! operands. Integer and double operands are 8 bytes little-endian, string
//! operands are UTF-8 terminated by a null byte, and mnemonics are 2-byte
//! opaque keys into the VM's mnemonic table. Jump operands are signed 64-bit
//! offsets relative to the cursor position after the operand is read.

/// Bytecode instructions for the Schemer VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    // =========================================================================
    // Stack pushes
    // =========================================================================
    /// Push a bool byte. Operand: 1 byte.
    PushB = 0x01,

    /// Push a char byte. Operand: 1 byte.
    PushC = 0x02,

    /// Push an integer. Operand: 8 bytes.
    PushI = 0x03,

    /// Push a double. Operand: 8 bytes.
    PushD = 0x04,

    /// Push a string, length word on top. Operand: UTF-8 bytes up to and
    /// including a terminating null.
    PushS = 0x05,

    /// Push an empty list cell (three zero words).
    Cons = 0x06,

    /// Duplicate the last-pushed value.
    Dup = 0x07,

    // =========================================================================
    // Heap stores (operand: 2-byte mnemonic)
    // =========================================================================
    /// Pop a bool byte and store it at the mnemonic's address.
    HStoreB = 0x08,

    /// Pop a char byte and store it at the mnemonic's address.
    HStoreC = 0x09,

    /// Pop an integer and store it at the mnemonic's address.
    HStoreI = 0x0A,

    /// Pop a double and store it at the mnemonic's address.
    HStoreD = 0x0B,

    /// Pop a string and store it length-prefixed at the mnemonic's address,
    /// reallocating (and rebinding the mnemonic) if it grew.
    HStoreS = 0x0C,

    /// Pop a list cell and store it at the mnemonic's address.
    HStoreL = 0x0D,

    // =========================================================================
    // Heap loads (operand: 2-byte mnemonic)
    // =========================================================================
    /// Read an integer at the mnemonic's address and push it.
    HLoadI = 0x16,

    /// Read a length-prefixed string at the mnemonic's address and push it.
    HLoadS = 0x18,

    /// Read a list cell at the mnemonic's address and push it.
    HLoadL = 0x19,

    // =========================================================================
    // Heap allocation (operand: 2-byte mnemonic)
    // =========================================================================
    /// Allocate an integer slot and bind the mnemonic to its address.
    HNewI = 0x22,

    /// Pop a length, allocate a string slot that size plus its length
    /// prefix, write the prefix, and bind the mnemonic.
    HNewS = 0x24,

    /// Allocate a list-cell slot and bind the mnemonic to its address.
    HNewL = 0x25,

    // =========================================================================
    // Control flow (operand: 8-byte signed relative offset)
    // =========================================================================
    /// Unconditional relative jump.
    Jmp = 0x2C,

    /// Pop a comparison result byte; jump if it is non-zero.
    Jne = 0x2D,

    // =========================================================================
    // Arithmetic and comparison
    // =========================================================================
    /// Pop two integers, push their sum.
    AddI = 0x36,

    /// Pop y then x; push 0 if equal, 1 if x > y, 2 if x < y.
    CmpI = 0x40,

    /// As cmpi, on doubles.
    CmpD = 0x41,

    // =========================================================================
    // Host interface
    // =========================================================================
    /// Sub-dispatch to a host call. Operand: 1 sub-code byte.
    Syscall = 0x43,

    /// Alias the first mnemonic to the second's address. Operand: two
    /// 2-byte mnemonics.
    HsMnem = 0x44,

    // =========================================================================
    // List cells
    // =========================================================================
    /// Pop two cells and compare their data addresses as cmpi.
    CmpL = 0x46,

    /// Pop a cell and push the data bytes it points at.
    HCar = 0x47,

    /// Pop a cell and push the cell its next pointer refers to.
    HCdr = 0x49,

    /// Pop a data blob and a cell; write the blob into the cell's data
    /// block (reallocating if it grew) and push the updated cell.
    HsCar = 0x4B,

    /// Pop a cell, point its next pointer at the mnemonic's address, and
    /// push the updated cell. Operand: 2-byte mnemonic.
    HsCdr = 0x4D,
}

impl OpCode {
    /// Decode an opcode byte. Bytes outside the instruction set return
    /// `None` and fault in the dispatch loop.
    pub fn from_byte(byte: u8) -> Option<OpCode> {
        let op = match byte {
            0x01 => OpCode::PushB,
            0x02 => OpCode::PushC,
            0x03 => OpCode::PushI,
            0x04 => OpCode::PushD,
            0x05 => OpCode::PushS,
            0x06 => OpCode::Cons,
            0x07 => OpCode::Dup,
            0x08 => OpCode::HStoreB,
            0x09 => OpCode::HStoreC,
            0x0A => OpCode::HStoreI,
            0x0B => OpCode::HStoreD,
            0x0C => OpCode::HStoreS,
            0x0D => OpCode::HStoreL,
            0x16 => OpCode::HLoadI,
            0x18 => OpCode::HLoadS,
            0x19 => OpCode::HLoadL,
            0x22 => OpCode::HNewI,
            0x24 => OpCode::HNewS,
            0x25 => OpCode::HNewL,
            0x2C => OpCode::Jmp,
            0x2D => OpCode::Jne,
            0x36 => OpCode::AddI,
            0x40 => OpCode::CmpI,
            0x41 => OpCode::CmpD,
            0x43 => OpCode::Syscall,
            0x44 => OpCode::HsMnem,
            0x46 => OpCode::CmpL,
            0x47 => OpCode::HCar,
            0x49 => OpCode::HCdr,
            0x4B => OpCode::HsCar,
            0x4D => OpCode::HsCdr,
            _ => return None,
        };
        Some(op)
    }

    /// Assembler name.
    pub fn name(self) -> &'static str {
        match self {
            OpCode::PushB => "pushb",
            OpCode::PushC => "pushc",
            OpCode::PushI => "pushi",
            OpCode::PushD => "pushd",
            OpCode::PushS => "pushs",
            OpCode::Cons => "cons",
            OpCode::Dup => "dup",
            OpCode::HStoreB => "hstoreb",
            OpCode::HStoreC => "hstorec",
            OpCode::HStoreI => "hstorei",
            OpCode::HStoreD => "hstored",
            OpCode::HStoreS => "hstores",
            OpCode::HStoreL => "hstorel",
            OpCode::HLoadI => "hloadi",
            OpCode::HLoadS => "hloads",
            OpCode::HLoadL => "hloadl",
            OpCode::HNewI => "hnewi",
            OpCode::HNewS => "hnews",
            OpCode::HNewL => "hnewl",
            OpCode::Jmp => "jmp",
            OpCode::Jne => "jne",
            OpCode::AddI => "addi",
            OpCode::CmpI => "cmpi",
            OpCode::CmpD => "cmpd",
            OpCode::Syscall => "syscall",
            OpCode::HsMnem => "hsmnem",
            OpCode::CmpL => "cmpl",
            OpCode::HCar => "hcar",
            OpCode::HCdr => "hcdr",
            OpCode::HsCar => "hscar",
            OpCode::HsCdr => "hscdr",
        }
    }
}

/// Sub-codes for the `syscall` opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Syscall {
    /// Pop a bool byte and print `true` or `false`.
    PrintBool = 0x01,

    /// Pop a char byte and print it.
    PrintChar = 0x02,

    /// Pop an integer and print it in decimal.
    PrintInt = 0x03,

    /// Pop a double and print it in decimal.
    PrintDouble = 0x04,

    /// Pop a string and print it as UTF-8.
    PrintString = 0x05,

    /// Pop an integer exit code and finish execution.
    Exit = 0x06,
}

impl Syscall {
    /// Decode a syscall sub-code byte.
    pub fn from_byte(byte: u8) -> Option<Syscall> {
        let syscall = match byte {
            0x01 => Syscall::PrintBool,
            0x02 => Syscall::PrintChar,
            0x03 => Syscall::PrintInt,
            0x04 => Syscall::PrintDouble,
            0x05 => Syscall::PrintString,
            0x06 => Syscall::Exit,
            _ => return None,
        };
        Some(syscall)
    }
}
