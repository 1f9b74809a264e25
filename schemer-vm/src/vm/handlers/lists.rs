// schemer-vm - Stack-based bytecode virtual machine for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! List cell handlers: cmpl, hcar, hcdr, hscar, hscdr.

use super::ordering_byte;
use crate::vm::{Result, Vm};

impl Vm<'_> {
    /// cmpl: compare two cells by their data addresses.
    pub(crate) fn op_cmpl(&mut self) -> Result<()> {
        let y = self.stack.pop_cell()?;
        let x = self.stack.pop_cell()?;
        self.stack.push_byte(ordering_byte(x.data_addr, y.data_addr));
        Ok(())
    }

    /// hcar: pop a cell and push the data block it points at, as one
    /// logical value of the cell's length.
    pub(crate) fn op_hcar(&mut self) -> Result<()> {
        let cell = self.stack.pop_cell()?;
        let data = self.heap.read(cell.length, cell.data_addr)?;
        self.stack.push_blob(&data);
        Ok(())
    }

    /// hcdr: pop a cell and push the cell its next pointer refers to.
    pub(crate) fn op_hcdr(&mut self) -> Result<()> {
        let cell = self.stack.pop_cell()?;
        let next = self.heap.read_cell(cell.next_addr)?;
        self.stack.push_cell(next);
        Ok(())
    }

    /// hscar: pop the last-pushed value as the new data blob, pop the cell,
    /// write the blob into the cell's data block (growing reallocates; an
    /// empty cell owns no block to free), and push the updated cell.
    pub(crate) fn op_hscar(&mut self) -> Result<()> {
        let blob = self.stack.pop_blob()?;
        let mut cell = self.stack.pop_cell()?;
        let blob_len = blob.len() as u64;
        if blob_len > cell.length {
            if cell.length > 0 {
                self.heap.free(cell.data_addr)?;
            }
            cell.data_addr = self.heap.allocate(blob_len)?;
        }
        cell.length = blob_len;
        self.heap.write(&blob, cell.data_addr)?;
        self.stack.push_cell(cell);
        Ok(())
    }

    /// hscdr: pop a cell, point it at the mnemonic's heap address, and push
    /// it back.
    pub(crate) fn op_hscdr(&mut self) -> Result<()> {
        let mnemonic = self.read_mnemonic()?;
        let address = self.mnemonic_address(mnemonic)?;
        let mut cell = self.stack.pop_cell()?;
        cell.next_addr = address;
        self.stack.push_cell(cell);
        Ok(())
    }
}
