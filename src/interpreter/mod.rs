//! Whitespace virtual machine
//!
//! This module provides the core execution logic:
//! - [`engine`]: Interpreter state, dispatch loop and execution history
//! - [`errors`]: Runtime error types
//! - [`labels`]: Lazily built label table
//!
//! # Execution Model
//!
//! The interpreter executes one instruction per [`engine::Interpreter::step`].
//! Each instruction group is handled in its own file (`stack_ops`,
//! `arithmetic`, `heap_ops`, `flow`, `io`), all extending the same
//! `Interpreter`. When history is enabled a snapshot is taken after every
//! instruction to enable time-travel debugging.

mod arithmetic;
pub mod engine;
pub mod errors;
mod flow;
mod heap_ops;
mod io;
pub mod labels;
mod stack_ops;
