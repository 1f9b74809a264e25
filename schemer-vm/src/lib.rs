// schemer-vm - Stack-based bytecode virtual machine for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # schemer-vm
//!
//! Stack-based bytecode virtual machine for Schemer.
//!
//! The VM is language-agnostic: it executes a flat byte sequence of opcodes
//! against a byte-granular value stack and a buddy-allocator heap, and talks
//! to the host through a single console sink. Nothing here depends on the
//! Schemer front end; callers hand in precompiled bytecode.

pub mod cell;
pub mod console;
pub mod opcode;
pub mod vm;

pub use cell::Cell;
pub use console::Console;
pub use opcode::{OpCode, Syscall};
pub use vm::{AllocError, FAULT_EXIT_CODE, Heap, Result, Stack, Vm, VmFault, run_program};
