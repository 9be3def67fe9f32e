//! Lexer (tokenizer) for Whitespace source
//!
//! Drives the [`Scanner`] through the three layers of every instruction:
//! the group prefix, the operation code within that group and, for the
//! operations that take one, a line-feed terminated parameter. The first
//! malformed sequence aborts lexing; a program that does not lex completely
//! is never executed.

use super::instruction::{
    ArithmeticOp, FlowOp, HeapOp, Instruction, InstructionGroup, IoOp, Label, Operation,
    Parameter, ParameterKind, SourceLocation, StackOp,
};
use super::literal::decode_number;
use super::scanner::Scanner;
use std::fmt;

const GROUPS: [InstructionGroup; 5] = [
    InstructionGroup::Stack,
    InstructionGroup::Arithmetic,
    InstructionGroup::Heap,
    InstructionGroup::Flow,
    InstructionGroup::Io,
];

const STACK_OPS: [Operation; 6] = [
    Operation::Stack(StackOp::Push),
    Operation::Stack(StackOp::Duplicate),
    Operation::Stack(StackOp::DuplicateN),
    Operation::Stack(StackOp::Swap),
    Operation::Stack(StackOp::Discard),
    Operation::Stack(StackOp::DiscardN),
];

const ARITHMETIC_OPS: [Operation; 5] = [
    Operation::Arithmetic(ArithmeticOp::Add),
    Operation::Arithmetic(ArithmeticOp::Sub),
    Operation::Arithmetic(ArithmeticOp::Mul),
    Operation::Arithmetic(ArithmeticOp::Div),
    Operation::Arithmetic(ArithmeticOp::Mod),
];

const HEAP_OPS: [Operation; 2] = [
    Operation::Heap(HeapOp::Store),
    Operation::Heap(HeapOp::Retrieve),
];

const FLOW_OPS: [Operation; 7] = [
    Operation::Flow(FlowOp::Label),
    Operation::Flow(FlowOp::Call),
    Operation::Flow(FlowOp::Jump),
    Operation::Flow(FlowOp::JumpZero),
    Operation::Flow(FlowOp::JumpNegative),
    Operation::Flow(FlowOp::Return),
    Operation::Flow(FlowOp::Exit),
];

const IO_OPS: [Operation; 4] = [
    Operation::Io(IoOp::PrintChar),
    Operation::Io(IoOp::PrintNum),
    Operation::Io(IoOp::ReadChar),
    Operation::Io(IoOp::ReadNum),
];

/// The closed operation-code table of a group
fn operations(group: InstructionGroup) -> &'static [Operation] {
    match group {
        InstructionGroup::Stack => &STACK_OPS,
        InstructionGroup::Arithmetic => &ARITHMETIC_OPS,
        InstructionGroup::Heap => &HEAP_OPS,
        InstructionGroup::Flow => &FLOW_OPS,
        InstructionGroup::Io => &IO_OPS,
    }
}

/// How many upcoming symbols to quote in an error message
const ERROR_CONTEXT: usize = 8;

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// None of the five group prefixes matched
    InvalidGroup {
        found: String,
        location: SourceLocation,
    },

    /// The group matched but no entry of its operation table did
    InvalidOperation {
        group: InstructionGroup,
        found: String,
        location: SourceLocation,
    },

    /// The operation needs a parameter and none (or a malformed one) follows
    InvalidParameter {
        operation: Operation,
        found: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::InvalidGroup { location, .. }
            | LexError::InvalidOperation { location, .. }
            | LexError::InvalidParameter { location, .. } => *location,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        write!(
            f,
            "Lexer error at line {}, column {}: ",
            location.line, location.column
        )?;
        match self {
            LexError::InvalidGroup { found, .. } => {
                write!(f, "invalid instruction group (found {})", found)
            }
            LexError::InvalidOperation { group, found, .. } => {
                write!(f, "invalid {} operation (found {})", group, found)
            }
            LexError::InvalidParameter {
                operation, found, ..
            } => {
                write!(f, "invalid parameter for '{}' (found {})", operation, found)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Lexer for Whitespace source
pub struct Lexer {
    scanner: Scanner,
}

impl Lexer {
    /// Create a lexer; comments are stripped immediately.
    pub fn new(source: &str) -> Self {
        Self {
            scanner: Scanner::new(source),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Instruction>, LexError> {
        let mut instructions = Vec::new();

        while !self.scanner.is_at_end() {
            instructions.push(self.next_instruction()?);
        }

        Ok(instructions)
    }

    fn next_instruction(&mut self) -> Result<Instruction, LexError> {
        let location = self.scanner.location();
        let group = self.scan_group()?;
        let operation = self.scan_operation(group)?;
        let parameter = match operation.parameter_kind() {
            Some(kind) => Some(self.scan_parameter(operation, kind)?),
            None => None,
        };

        Ok(Instruction::new(operation, parameter).at(location))
    }

    fn scan_group(&mut self) -> Result<InstructionGroup, LexError> {
        let location = self.scanner.location();
        self.scanner
            .scan_table(GROUPS.iter().map(|&group| (group.prefix(), group)))
            .ok_or_else(|| LexError::InvalidGroup {
                found: self.scanner.lookahead(ERROR_CONTEXT),
                location,
            })
    }

    fn scan_operation(&mut self, group: InstructionGroup) -> Result<Operation, LexError> {
        let location = self.scanner.location();
        self.scanner
            .scan_table(operations(group).iter().map(|&op| (op.code(), op)))
            .ok_or_else(|| LexError::InvalidOperation {
                group,
                found: self.scanner.lookahead(ERROR_CONTEXT),
                location,
            })
    }

    fn scan_parameter(
        &mut self,
        operation: Operation,
        kind: ParameterKind,
    ) -> Result<Parameter, LexError> {
        let location = self.scanner.location();
        let invalid = |scanner: &Scanner| LexError::InvalidParameter {
            operation,
            found: scanner.lookahead(ERROR_CONTEXT),
            location,
        };

        let symbols = match self.scanner.scan_parameter() {
            Some(symbols) => symbols,
            None => return Err(invalid(&self.scanner)),
        };

        match kind {
            ParameterKind::Label => Ok(Parameter::Label(Label::new(symbols))),
            ParameterKind::Number => decode_number(&symbols)
                .map(Parameter::Number)
                .ok_or_else(|| invalid(&self.scanner)),
        }
    }
}
