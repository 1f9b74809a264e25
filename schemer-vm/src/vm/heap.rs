// schemer-vm - Stack-based bytecode virtual machine for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Buddy-allocator heap.
//!
//! A fixed arena carved into power-of-two blocks. A block of order `k`
//! spans `BLOCK_SIZE * 2^k` bytes and starts at a multiple of its own size,
//! so every block has exactly one same-sized sibling; freeing a block whose
//! sibling is already free merges the pair into one block a level up.

use std::collections::HashMap;

use crate::cell::Cell;

use super::error::{AllocError, Result, VmFault};

/// Arena size in bytes.
pub const INITIAL_HEAP_SIZE: u64 = 16_384;

/// Smallest allocatable block in bytes.
pub const BLOCK_SIZE: u64 = 32;

/// Largest supported order.
pub const MAX_ORDER: u8 = 10;

/// Smallest order whose block holds `requested_bytes`.
///
/// Integer-only: the byte count rounds up to whole blocks, the block count
/// rounds up to a power of two, and the exponent is the order. Requests
/// past the largest supported block return `MAX_ORDER + 1`, which
/// `allocate` rejects.
pub fn order_for(requested_bytes: u64) -> u8 {
    if requested_bytes <= BLOCK_SIZE {
        return 0;
    }
    let blocks = requested_bytes.div_ceil(BLOCK_SIZE);
    if blocks > 1 << MAX_ORDER {
        return MAX_ORDER + 1;
    }
    blocks.next_power_of_two().trailing_zeros() as u8
}

/// The VM's heap: one fixed arena per VM instance.
#[derive(Debug)]
pub struct Heap {
    space: Vec<u8>,
    /// Free block addresses, indexed by order.
    unused_blocks: Vec<Vec<u64>>,
    /// Order of every block, live or free, by start address.
    block_map: HashMap<u64, u8>,
}

impl Heap {
    /// Create a heap whose whole arena is one free root block.
    pub fn new() -> Self {
        let mut heap = Self {
            space: vec![0; INITIAL_HEAP_SIZE as usize],
            unused_blocks: vec![Vec::new(); MAX_ORDER as usize + 1],
            block_map: HashMap::new(),
        };
        let root_order = Self::root_order();
        heap.unused_blocks[root_order as usize].push(0);
        heap.block_map.insert(0, root_order);
        heap
    }

    /// Order of the root block covering the whole arena.
    pub fn root_order() -> u8 {
        order_for(INITIAL_HEAP_SIZE)
    }

    /// Allocate a block of at least `num_bytes`; returns its address.
    pub fn allocate(&mut self, num_bytes: u64) -> Result<u64, AllocError> {
        let order = order_for(num_bytes);
        if order > MAX_ORDER {
            return Err(AllocError::TooLarge {
                requested: num_bytes,
            });
        }
        if self.unused_blocks[order as usize].is_empty() {
            self.create_block(order)?;
        }
        Ok(self.unused_blocks[order as usize].remove(0))
    }

    /// Release the block starting at `address`, merging buddies as far up
    /// as possible.
    pub fn free(&mut self, address: u64) -> Result<(), AllocError> {
        let order = *self
            .block_map
            .get(&address)
            .ok_or(AllocError::UnknownBlock { address })?;
        self.unused_blocks[order as usize].push(address);
        if self.has_buddy(address, order) {
            self.merge_with_buddy(address, order);
        }
        Ok(())
    }

    /// Copy `data` into the arena starting at `address`.
    pub fn write(&mut self, data: &[u8], address: u64) -> Result<()> {
        let len = data.len() as u64;
        let end = self.bounded_end(address, len)?;
        self.space[address as usize..end as usize].copy_from_slice(data);
        Ok(())
    }

    /// Copy `num_bytes` out of the arena starting at `address`.
    pub fn read(&self, num_bytes: u64, address: u64) -> Result<Vec<u8>> {
        let end = self.bounded_end(address, num_bytes)?;
        Ok(self.space[address as usize..end as usize].to_vec())
    }

    /// Bytes from `address` up to, and not including, the first null.
    pub fn read_string(&self, address: u64) -> Result<Vec<u8>> {
        self.bounded_end(address, 0)?;
        let tail = &self.space[address as usize..];
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        Ok(tail[..end].to_vec())
    }

    /// Read a little-endian u64 at `address`.
    pub fn read_u64(&self, address: u64) -> Result<u64> {
        let bytes = self.read(8, address)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&bytes);
        Ok(u64::from_le_bytes(buf))
    }

    /// Write a little-endian u64 at `address`.
    pub fn write_u64(&mut self, value: u64, address: u64) -> Result<()> {
        self.write(&value.to_le_bytes(), address)
    }

    /// Read a list cell at `address`.
    pub fn read_cell(&self, address: u64) -> Result<Cell> {
        let bytes = self.read(Cell::SIZE, address)?;
        let mut buf = [0u8; 24];
        buf.copy_from_slice(&bytes);
        Ok(Cell::from_bytes(buf))
    }

    /// Write a list cell at `address`.
    pub fn write_cell(&mut self, cell: Cell, address: u64) -> Result<()> {
        self.write(&cell.to_bytes(), address)
    }

    /// Free-list snapshot for one order.
    pub fn free_blocks(&self, order: u8) -> &[u64] {
        &self.unused_blocks[order as usize]
    }

    /// Order of the block starting at `address`, if one does.
    pub fn block_order(&self, address: u64) -> Option<u8> {
        self.block_map.get(&address).copied()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn bounded_end(&self, address: u64, len: u64) -> Result<u64> {
        let end = address
            .checked_add(len)
            .ok_or(VmFault::HeapOutOfBounds { address, len })?;
        if end > self.space.len() as u64 {
            return Err(VmFault::HeapOutOfBounds { address, len });
        }
        Ok(end)
    }

    /// Split larger blocks until a free block of `order` exists.
    fn create_block(&mut self, order: u8) -> Result<(), AllocError> {
        let mut free_order = order + 1;
        while free_order <= MAX_ORDER && self.unused_blocks[free_order as usize].is_empty() {
            free_order += 1;
        }
        if free_order > MAX_ORDER {
            return Err(AllocError::OutOfMemory);
        }
        while free_order > order {
            let address = self.unused_blocks[free_order as usize][0];
            self.split_block(address, free_order);
            free_order -= 1;
        }
        Ok(())
    }

    /// Split a free block in two one order down. The upper half goes onto
    /// the free list first, so fresh allocations come from the upper end of
    /// a split region.
    fn split_block(&mut self, address: u64, order: u8) {
        let list = &mut self.unused_blocks[order as usize];
        if let Some(index) = list.iter().position(|&a| a == address) {
            list.remove(index);
        }
        let target_order = order - 1;
        let second_address = address + BLOCK_SIZE * (1 << target_order);
        self.unused_blocks[target_order as usize].push(second_address);
        self.block_map.insert(second_address, target_order);
        self.unused_blocks[target_order as usize].push(address);
        self.block_map.insert(address, target_order);
    }

    /// A block's unique sibling at the same order.
    fn buddy_address(address: u64, order: u8) -> u64 {
        let total_size = BLOCK_SIZE * (1 << order);
        let buddy_number = address / total_size;
        if buddy_number % 2 == 0 {
            address + total_size
        } else {
            address - total_size
        }
    }

    fn has_buddy(&self, address: u64, order: u8) -> bool {
        let buddy = Self::buddy_address(address, order);
        self.unused_blocks[order as usize].contains(&buddy)
    }

    /// Merge a free block with its free buddy, recursing upward while the
    /// merged block's buddy is free too.
    fn merge_with_buddy(&mut self, address: u64, order: u8) {
        let buddy = Self::buddy_address(address, order);
        let merged = address.min(buddy);
        self.block_map.remove(&address.max(buddy));

        let list = &mut self.unused_blocks[order as usize];
        if let Some(index) = list.iter().position(|&a| a == buddy) {
            list.remove(index);
        }
        if let Some(index) = list.iter().position(|&a| a == address) {
            list.remove(index);
        }

        let merged_order = order + 1;
        self.block_map.insert(merged, merged_order);
        self.unused_blocks[merged_order as usize].push(merged);
        if merged_order < MAX_ORDER && self.has_buddy(merged, merged_order) {
            self.merge_with_buddy(merged, merged_order);
        }
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
