//! # Introduction
//!
//! wstty runs programs written in Whitespace, a language whose only
//! meaningful characters are space, tab and line feed. Every other
//! character is a comment. Execution can optionally record a snapshot of
//! the full machine state after each instruction, and the recorded history
//! can be navigated forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Scanner → Lexer → Program → Interpreter → Snapshots → TUI
//! ```
//!
//! 1. [`parser`] strips comments, matches the prefix-free instruction codes
//!    and decodes parameters into a [`parser::instruction::Program`].
//! 2. [`interpreter`] executes the program one instruction at a time.
//! 3. [`memory`] holds the machine state: the operand and call stacks and
//!    the sparse heap, all over unbounded integers.
//! 4. [`snapshot`] keeps execution history under a memory limit and the
//!    [`snapshot::MockTerminal`] transcript of everything printed.
//! 5. [`ui`] is the ratatui viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use wstty::interpreter::engine::{HaltReason, Interpreter};
//! use wstty::parser::parse_program;
//!
//! // push 1, push 2, add, print_num, exit
//! let source = "   \t\n   \t \n\t   \t\n \t\n\n\n";
//! let program = parse_program(source).unwrap();
//! let mut interpreter = Interpreter::new(program);
//! assert_eq!(interpreter.run(), Ok(HaltReason::Exit));
//! assert_eq!(interpreter.terminal().output(), "3");
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;
