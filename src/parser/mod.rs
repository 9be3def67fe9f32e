//! Whitespace source front end
//!
//! This module turns raw text into a [`Program`]:
//! - [`scanner`]: Comment stripping and all-or-nothing symbol matching
//! - [`lexer`]: Instruction lexing (group → operation → parameter)
//! - [`literal`]: Sign+magnitude number encoding
//! - [`instruction`]: Instruction set definitions
//!
//! # Grammar
//!
//! Only space (`S`), tab (`T`) and line feed (`L`) are meaningful; every
//! other character is a comment. Each instruction is a group prefix
//! (`S` stack, `TS` arithmetic, `TT` heap, `L` flow, `TL` io), an operation
//! code from that group's table, and for some operations a parameter ending
//! in `L`.
//!
//! # Implementation
//!
//! Hand-written single-pass lexer. The prefix codes are prefix-free, so no
//! backtracking is ever needed.

pub mod instruction;
pub mod lexer;
pub mod literal;
pub mod scanner;

use instruction::Program;
use lexer::{LexError, Lexer};

/// Lex a complete program
pub fn parse_program(source: &str) -> Result<Program, LexError> {
    Lexer::new(source).tokenize().map(Program::new)
}
