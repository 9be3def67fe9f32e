//! Runtime error types for the Whitespace interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to lexer errors).
//!
//! All runtime errors are fatal - they halt execution and identify the instruction
//! that raised them through an [`InstructionSite`].

use crate::memory::value::Value;
use crate::parser::instruction::{Label, Operation, SourceLocation};
use std::fmt;

/// The instruction that was executing when an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSite {
    /// Program counter value of the instruction (its index in the program)
    pub index: usize,
    pub operation: Operation,
    pub location: SourceLocation,
}

impl fmt::Display for InstructionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' at instruction {} (line {}, column {})",
            self.operation, self.index, self.location.line, self.location.column
        )
    }
}

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The operand stack holds fewer values than the operation consumes
    EmptyStack {
        needed: usize,
        found: usize,
        site: InstructionSite,
    },

    /// `duplicate_n`/`discard_n` count reaches past the bottom of the stack
    IndexOutOfRange {
        index: Value,
        depth: usize,
        site: InstructionSite,
    },

    /// Division or modulo by zero
    DivisionByZero { site: InstructionSite },

    /// `retrieve` from an address that was never stored to
    UndefinedHeapAddress {
        address: Value,
        site: InstructionSite,
    },

    /// Jump or call to a label that no instruction defines
    UndefinedLabel {
        label: Label,
        site: InstructionSite,
    },

    /// `return` with no active call
    CallStackUnderflow { site: InstructionSite },

    /// `read_num` got a line that is not a decimal integer
    InvalidNumberInput {
        input: String,
        site: InstructionSite,
    },

    /// `read_char` got bytes that do not form a UTF-8 character; they are
    /// consumed from the input
    InvalidCharacterInput {
        bytes: Vec<u8>,
        site: InstructionSite,
    },

    /// `read_char`/`read_num` hit the end of the input stream
    EndOfInput { site: InstructionSite },

    /// `print_char` of a value that is not a Unicode scalar value
    InvalidCharacter {
        value: Value,
        site: InstructionSite,
    },

    /// An instruction was built without the parameter its operation requires
    MissingParameter { site: InstructionSite },

    /// Reading input or writing output failed
    Io {
        message: String,
        site: InstructionSite,
    },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation failed (already at start/end, nothing recorded)
    HistoryOperationFailed { message: String },
}

impl RuntimeError {
    pub fn site(&self) -> Option<&InstructionSite> {
        match self {
            RuntimeError::EmptyStack { site, .. } => Some(site),
            RuntimeError::IndexOutOfRange { site, .. } => Some(site),
            RuntimeError::DivisionByZero { site } => Some(site),
            RuntimeError::UndefinedHeapAddress { site, .. } => Some(site),
            RuntimeError::UndefinedLabel { site, .. } => Some(site),
            RuntimeError::CallStackUnderflow { site } => Some(site),
            RuntimeError::InvalidNumberInput { site, .. } => Some(site),
            RuntimeError::InvalidCharacterInput { site, .. } => Some(site),
            RuntimeError::EndOfInput { site } => Some(site),
            RuntimeError::InvalidCharacter { site, .. } => Some(site),
            RuntimeError::MissingParameter { site } => Some(site),
            RuntimeError::Io { site, .. } => Some(site),
            RuntimeError::SnapshotLimitExceeded { .. } => None,
            RuntimeError::HistoryOperationFailed { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::EmptyStack {
                needed,
                found,
                site,
            } => {
                write!(
                    f,
                    "Stack underflow in {}: needs {} value{}, stack has {}",
                    site,
                    needed,
                    if *needed == 1 { "" } else { "s" },
                    found
                )
            }
            RuntimeError::IndexOutOfRange { index, depth, site } => {
                write!(
                    f,
                    "Stack index {} out of range in {}: stack depth is {}",
                    index, site, depth
                )
            }
            RuntimeError::DivisionByZero { site } => {
                write!(f, "Division by zero in {}", site)
            }
            RuntimeError::UndefinedHeapAddress { address, site } => {
                write!(
                    f,
                    "Heap address {} was never stored to, in {}",
                    address, site
                )
            }
            RuntimeError::UndefinedLabel { label, site } => {
                write!(f, "Undefined label {} in {}", label, site)
            }
            RuntimeError::CallStackUnderflow { site } => {
                write!(f, "Return without a matching call in {}", site)
            }
            RuntimeError::InvalidNumberInput { input, site } => {
                write!(f, "Invalid number input {:?} for {}", input, site)
            }
            RuntimeError::InvalidCharacterInput { bytes, site } => {
                write!(f, "Input bytes {:02X?} are not UTF-8, in {}", bytes, site)
            }
            RuntimeError::EndOfInput { site } => {
                write!(f, "Unexpected end of input in {}", site)
            }
            RuntimeError::InvalidCharacter { value, site } => {
                write!(f, "Value {} is not a character, in {}", value, site)
            }
            RuntimeError::MissingParameter { site } => {
                write!(f, "Missing parameter for {}", site)
            }
            RuntimeError::Io { message, site } => {
                write!(f, "I/O error in {}: {}", site, message)
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            RuntimeError::HistoryOperationFailed { message } => {
                write!(f, "History operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
