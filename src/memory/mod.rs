//! Memory model for the Whitespace virtual machine
//!
//! This module provides the core memory abstractions:
//! - [`value`]: Runtime value representation (unbounded signed integers)
//! - [`stack`]: Operand stack and call stack
//! - [`heap`]: Sparse integer-addressed heap
//!
//! None of these types know about instructions or program counters. They
//! report failures with plain data ([`stack::StackFault`], `Option`) and the
//! interpreter turns those into `RuntimeError`s carrying the failing
//! instruction.

pub mod heap;
pub mod stack;
pub mod value;
