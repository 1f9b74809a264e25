// schemer-vm - Stack-based bytecode virtual machine for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Heap storage handlers: hstore*, hload*, hnew*, hsmnem.
//!
//! Every opcode here carries a 2-byte mnemonic operand naming a heap
//! binding. Strings live in the heap as a u64 length prefix followed by
//! their bytes; a store that outgrows the stored length frees the block,
//! allocates a bigger one, and rebinds the mnemonic.

use crate::cell::Cell;
use crate::vm::{Result, Vm};

impl Vm<'_> {
    /// hstoreb / hstorec: both store a single popped byte.
    pub(crate) fn op_hstore_byte(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.mnemonic_address(mnemonic)?;
        let value = self.stack.pop_byte()?;
        self.heap.write(&[value], address)
    }

    pub(crate) fn op_hstorei(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.mnemonic_address(mnemonic)?;
        let value = self.stack.pop_int()?;
        self.heap.write(&value.to_le_bytes(), address)
    }

    pub(crate) fn op_hstored(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.mnemonic_address(mnemonic)?;
        let value = self.stack.pop_double()?;
        self.heap.write(&value.to_le_bytes(), address)
    }

    pub(crate) fn op_hstores(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let mut address = self.mnemonic_address(mnemonic)?;
        let bytes = self.stack.pop_string()?;
        let new_len = bytes.len() as u64;
        let stored_len = self.heap.read_u64(address)?;
        if new_len > stored_len {
            self.heap.free(address)?;
            address = self.heap.allocate(8 + new_len)?;
            self.mnemonics.insert(mnemonic, address);
        }
        self.heap.write_u64(new_len, address)?;
        self.heap.write(&bytes, address + 8)
    }

    pub(crate) fn op_hstorel(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.mnemonic_address(mnemonic)?;
        let cell = self.stack.pop_cell()?;
        self.heap.write_cell(cell, address)
    }

    pub(crate) fn op_hloadi(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.mnemonic_address(mnemonic)?;
        let value = self.heap.read_u64(address)?;
        self.stack.push_int(value as i64);
        Ok(())
    }

    pub(crate) fn op_hloads(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.mnemonic_address(mnemonic)?;
        let length = self.heap.read_u64(address)?;
        let bytes = self.heap.read(length, address + 8)?;
        self.stack.push_string(&bytes);
        Ok(())
    }

    pub(crate) fn op_hloadl(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.mnemonic_address(mnemonic)?;
        let cell = self.heap.read_cell(address)?;
        self.stack.push_cell(cell);
        Ok(())
    }

    pub(crate) fn op_hnewi(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.heap.allocate(8)?;
        self.mnemonics.insert(mnemonic, address);
        Ok(())
    }

    /// hnews: the string's byte length is popped from the stack; the block
    /// holds the length prefix plus that many bytes.
    pub(crate) fn op_hnews(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let length = self.stack.pop_int()? as u64;
        let address = self.heap.allocate(8 + length)?;
        self.heap.write_u64(length, address)?;
        self.mnemonics.insert(mnemonic, address);
        Ok(())
    }

    pub(crate) fn op_hnewl(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.heap.allocate(Cell::SIZE)?;
        self.mnemonics.insert(mnemonic, address);
        Ok(())
    }

    /// hsmnem: alias the first mnemonic to the second's address.
    pub(crate) fn op_hsmnem(&mut self) -> Result<()> {
        let alias = self.read_mnemonic()?;
        let target = self.read_mnemonic()?;
        let address = self.mnemonic_address(target)?;
        self.mnemonics.insert(alias, address);
        Ok(())
    }
}
