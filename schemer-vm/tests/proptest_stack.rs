// schemer-vm - Property-based stack tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for the byte stack:
//! - every typed push followed by its pop is bit-for-bit lossless
//! - dup duplicates the whole last-pushed value at its recorded width

use proptest::prelude::*;
use schemer_vm::vm::Stack;
use schemer_vm::{Cell, VmFault};

proptest! {
    #[test]
    fn int_round_trip(value in any::<i64>()) {
        let mut stack = Stack::new();
        stack.push_int(value);
        prop_assert_eq!(stack.last_pushed_len(), 8);
        prop_assert_eq!(stack.pop_int().unwrap(), value);
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn double_round_trip(bits in any::<u64>()) {
        let mut stack = Stack::new();
        let value = f64::from_bits(bits);
        stack.push_double(value);
        prop_assert_eq!(stack.pop_double().unwrap().to_bits(), bits);
    }

    #[test]
    fn string_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut stack = Stack::new();
        stack.push_string(&bytes);
        prop_assert_eq!(stack.last_pushed_len(), bytes.len() as u64);
        prop_assert_eq!(stack.pop_string().unwrap(), bytes);
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn cell_round_trip(length in any::<u64>(), data_addr in any::<u64>(), next_addr in any::<u64>()) {
        let mut stack = Stack::new();
        let cell = Cell { length, data_addr, next_addr };
        stack.push_cell(cell);
        prop_assert_eq!(stack.last_pushed_len(), Cell::SIZE);
        prop_assert_eq!(stack.pop_cell().unwrap(), cell);
    }

    /// Stacked values pop back in LIFO order regardless of width mixing.
    #[test]
    fn mixed_widths_pop_in_reverse(byte in any::<u8>(), int in any::<i64>(), bits in any::<u64>()) {
        let mut stack = Stack::new();
        stack.push_byte(byte);
        stack.push_int(int);
        stack.push_double(f64::from_bits(bits));
        prop_assert_eq!(stack.pop_double().unwrap().to_bits(), bits);
        prop_assert_eq!(stack.pop_int().unwrap(), int);
        prop_assert_eq!(stack.pop_byte().unwrap(), byte);
        prop_assert_eq!(stack.pop_byte(), Err(VmFault::StackUnderflow));
    }

    /// Dup after a typed push leaves two identical values of that width.
    #[test]
    fn dup_duplicates_the_last_int(value in any::<i64>()) {
        let mut stack = Stack::new();
        stack.push_int(value);
        let width = stack.last_pushed_len();
        stack.dup().unwrap();
        prop_assert_eq!(stack.last_pushed_len(), width);
        prop_assert_eq!(stack.pop_int().unwrap(), value);
        prop_assert_eq!(stack.pop_int().unwrap(), value);
    }

    #[test]
    fn dup_duplicates_the_last_cell(length in any::<u64>(), data_addr in any::<u64>()) {
        let mut stack = Stack::new();
        let cell = Cell { length, data_addr, next_addr: 0 };
        stack.push_cell(cell);
        stack.dup().unwrap();
        prop_assert_eq!(stack.pop_cell().unwrap(), cell);
        prop_assert_eq!(stack.pop_cell().unwrap(), cell);
        prop_assert!(stack.is_empty());
    }
}
