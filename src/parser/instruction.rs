// Instruction set definitions for the Whitespace interpreter

use super::literal;
use num_bigint::BigInt;
use std::fmt;

/// Source location information for error reporting
///
/// Positions refer to the original text, before comments were stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The three meaningful characters of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Space,
    Tab,
    LineFeed,
}

impl Symbol {
    pub fn from_char(ch: char) -> Option<Symbol> {
        match ch {
            ' ' => Some(Symbol::Space),
            '\t' => Some(Symbol::Tab),
            '\n' => Some(Symbol::LineFeed),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::Space => ' ',
            Symbol::Tab => '\t',
            Symbol::LineFeed => '\n',
        }
    }

    /// Printable mnemonic used in listings and diagnostics
    pub fn mnemonic(self) -> char {
        match self {
            Symbol::Space => 'S',
            Symbol::Tab => 'T',
            Symbol::LineFeed => 'L',
        }
    }
}

/// Render a symbol run in `S`/`T`/`L` notation
pub fn render_symbols(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.mnemonic()).collect()
}

/// Instruction modification parameter (IMP): selects the operation family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionGroup {
    Stack,
    Arithmetic,
    Heap,
    Flow,
    Io,
}

impl InstructionGroup {
    /// Prefix code that introduces this group in source
    pub fn prefix(self) -> &'static [Symbol] {
        use Symbol::*;
        match self {
            InstructionGroup::Stack => &[Space],
            InstructionGroup::Arithmetic => &[Tab, Space],
            InstructionGroup::Heap => &[Tab, Tab],
            InstructionGroup::Flow => &[LineFeed],
            InstructionGroup::Io => &[Tab, LineFeed],
        }
    }
}

impl fmt::Display for InstructionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstructionGroup::Stack => "stack",
            InstructionGroup::Arithmetic => "arithmetic",
            InstructionGroup::Heap => "heap",
            InstructionGroup::Flow => "flow",
            InstructionGroup::Io => "io",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackOp {
    Push,
    Duplicate,
    DuplicateN,
    Swap,
    Discard,
    DiscardN,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapOp {
    Store,
    Retrieve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowOp {
    Label,
    Call,
    Jump,
    JumpZero,
    JumpNegative,
    Return,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoOp {
    PrintChar,
    PrintNum,
    ReadChar,
    ReadNum,
}

/// A concrete operation, nested by instruction group so that dispatch is
/// checked for exhaustiveness at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Stack(StackOp),
    Arithmetic(ArithmeticOp),
    Heap(HeapOp),
    Flow(FlowOp),
    Io(IoOp),
}

/// What kind of parameter an operation reads after its code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Number,
    Label,
}

impl Operation {
    pub fn group(self) -> InstructionGroup {
        match self {
            Operation::Stack(_) => InstructionGroup::Stack,
            Operation::Arithmetic(_) => InstructionGroup::Arithmetic,
            Operation::Heap(_) => InstructionGroup::Heap,
            Operation::Flow(_) => InstructionGroup::Flow,
            Operation::Io(_) => InstructionGroup::Io,
        }
    }

    pub fn parameter_kind(self) -> Option<ParameterKind> {
        match self {
            Operation::Stack(StackOp::Push | StackOp::DuplicateN | StackOp::DiscardN) => {
                Some(ParameterKind::Number)
            }
            Operation::Flow(
                FlowOp::Label | FlowOp::Call | FlowOp::Jump | FlowOp::JumpZero | FlowOp::JumpNegative,
            ) => Some(ParameterKind::Label),
            _ => None,
        }
    }

    /// Operation code that follows the group prefix in source
    pub fn code(self) -> &'static [Symbol] {
        use Symbol::*;
        match self {
            Operation::Stack(op) => match op {
                StackOp::Push => &[Space],
                StackOp::Duplicate => &[LineFeed, Space],
                StackOp::DuplicateN => &[Tab, Space],
                StackOp::Swap => &[LineFeed, Tab],
                StackOp::Discard => &[LineFeed, LineFeed],
                StackOp::DiscardN => &[Tab, LineFeed],
            },
            Operation::Arithmetic(op) => match op {
                ArithmeticOp::Add => &[Space, Space],
                ArithmeticOp::Sub => &[Space, Tab],
                ArithmeticOp::Mul => &[Space, LineFeed],
                ArithmeticOp::Div => &[Tab, Space],
                ArithmeticOp::Mod => &[Tab, Tab],
            },
            Operation::Heap(op) => match op {
                HeapOp::Store => &[Space],
                HeapOp::Retrieve => &[Tab],
            },
            Operation::Flow(op) => match op {
                FlowOp::Label => &[Space, Space],
                FlowOp::Call => &[Space, Tab],
                FlowOp::Jump => &[Space, LineFeed],
                FlowOp::JumpZero => &[Tab, Space],
                FlowOp::JumpNegative => &[Tab, Tab],
                FlowOp::Return => &[Tab, LineFeed],
                FlowOp::Exit => &[LineFeed, LineFeed],
            },
            Operation::Io(op) => match op {
                IoOp::PrintChar => &[Space, Space],
                IoOp::PrintNum => &[Space, Tab],
                IoOp::ReadChar => &[Tab, Space],
                IoOp::ReadNum => &[Tab, Tab],
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Stack(op) => match op {
                StackOp::Push => "push",
                StackOp::Duplicate => "duplicate",
                StackOp::DuplicateN => "duplicate_n",
                StackOp::Swap => "swap",
                StackOp::Discard => "discard",
                StackOp::DiscardN => "discard_n",
            },
            Operation::Arithmetic(op) => match op {
                ArithmeticOp::Add => "add",
                ArithmeticOp::Sub => "sub",
                ArithmeticOp::Mul => "mul",
                ArithmeticOp::Div => "div",
                ArithmeticOp::Mod => "mod",
            },
            Operation::Heap(op) => match op {
                HeapOp::Store => "store",
                HeapOp::Retrieve => "retrieve",
            },
            Operation::Flow(op) => match op {
                FlowOp::Label => "label",
                FlowOp::Call => "call",
                FlowOp::Jump => "jump",
                FlowOp::JumpZero => "jump_zero",
                FlowOp::JumpNegative => "jump_negative",
                FlowOp::Return => "return",
                FlowOp::Exit => "exit",
            },
            Operation::Io(op) => match op {
                IoOp::PrintChar => "print_char",
                IoOp::PrintNum => "print_num",
                IoOp::ReadChar => "read_char",
                IoOp::ReadNum => "read_num",
            },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque jump target: the raw sign+bit symbol run, never decoded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(Vec<Symbol>);

impl Label {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Label(symbols)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L:{}", render_symbols(&self.0).to_lowercase())
    }
}

/// Operand following the operation code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    Number(BigInt),
    Label(Label),
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Number(n) => write!(f, "{}", n),
            Parameter::Label(label) => write!(f, "{}", label),
        }
    }
}

/// One lexed instruction. Immutable once produced by the lexer.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub operation: Operation,
    pub parameter: Option<Parameter>,
    /// Where the instruction's first symbol appeared (not part of identity)
    pub location: SourceLocation,
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.operation == other.operation && self.parameter == other.parameter
    }
}

impl Eq for Instruction {}

impl Instruction {
    pub fn new(operation: Operation, parameter: Option<Parameter>) -> Self {
        Instruction {
            operation,
            parameter,
            location: SourceLocation::default(),
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn group(&self) -> InstructionGroup {
        self.operation.group()
    }

    /// Encode back to whitespace source text
    pub fn to_source(&self) -> String {
        let mut symbols: Vec<Symbol> = self.group().prefix().to_vec();
        symbols.extend_from_slice(self.operation.code());
        match &self.parameter {
            Some(Parameter::Number(n)) => symbols.extend(literal::encode_number(n)),
            Some(Parameter::Label(label)) => {
                symbols.extend_from_slice(label.symbols());
                symbols.push(Symbol::LineFeed);
            }
            None => {}
        }
        symbols.into_iter().map(Symbol::as_char).collect()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(param) => write!(f, "{} {}", self.operation, param),
            None => write!(f, "{}", self.operation),
        }
    }
}

/// A lexed program: the read-only instruction sequence handed to the interpreter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Program { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn to_source(&self) -> String {
        self.instructions.iter().map(Instruction::to_source).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_prefixes_are_prefix_free() {
        let groups = [
            InstructionGroup::Stack,
            InstructionGroup::Arithmetic,
            InstructionGroup::Heap,
            InstructionGroup::Flow,
            InstructionGroup::Io,
        ];
        for a in groups {
            for b in groups {
                if a != b {
                    assert!(
                        !b.prefix().starts_with(a.prefix()),
                        "{} is a prefix of {}",
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_parameter_kinds() {
        assert_eq!(
            Operation::Stack(StackOp::DuplicateN).parameter_kind(),
            Some(ParameterKind::Number)
        );
        assert_eq!(
            Operation::Stack(StackOp::DiscardN).parameter_kind(),
            Some(ParameterKind::Number)
        );
        assert_eq!(
            Operation::Flow(FlowOp::JumpZero).parameter_kind(),
            Some(ParameterKind::Label)
        );
        assert_eq!(Operation::Flow(FlowOp::Return).parameter_kind(), None);
        assert_eq!(Operation::Io(IoOp::PrintNum).parameter_kind(), None);
    }

    #[test]
    fn test_instruction_equality_ignores_location() {
        let a = Instruction::new(Operation::Heap(HeapOp::Store), None).at(SourceLocation::new(1, 1));
        let b = Instruction::new(Operation::Heap(HeapOp::Store), None).at(SourceLocation::new(9, 4));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let push = Instruction::new(
            Operation::Stack(StackOp::Push),
            Some(Parameter::Number(BigInt::from(-5))),
        );
        assert_eq!(push.to_string(), "push -5");

        let jump = Instruction::new(
            Operation::Flow(FlowOp::Jump),
            Some(Parameter::Label(Label::new(vec![Symbol::Space, Symbol::Tab]))),
        );
        assert_eq!(jump.to_string(), "jump L:st");
    }
}
