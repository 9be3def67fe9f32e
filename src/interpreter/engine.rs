// Execution engine for the Whitespace interpreter

use crate::interpreter::errors::{InstructionSite, RuntimeError};
use crate::interpreter::labels::LabelTable;
use crate::memory::{
    heap::Heap,
    stack::{CallStack, OperandStack, StackFault},
    value::Value,
};
use crate::parser::instruction::{Instruction, Label, Operation, Parameter, Program};
use crate::snapshot::{MockTerminal, Snapshot, SnapshotManager};
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// Why execution stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// An `exit` instruction ran
    Exit,
    /// The program counter ran past the last instruction
    EndOfProgram,
}

/// Execution status after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted(HaltReason),
}

/// The Whitespace virtual machine
pub struct Interpreter {
    /// Lexed program, shared read-only for the whole run
    pub(crate) instructions: Rc<[Instruction]>,

    /// Operand stack
    pub(crate) stack: OperandStack,

    /// Heap memory
    pub(crate) heap: Heap,

    /// Return addresses pushed by `call`
    pub(crate) call_stack: CallStack,

    /// Label → instruction index, built on the first miss
    pub(crate) labels: LabelTable,

    /// Index of the next instruction to execute
    pub(crate) pc: usize,

    pub(crate) status: Status,

    /// Index of the most recently executed instruction
    last_executed: Option<usize>,

    /// Program input (`read_char`, `read_num`)
    pub(crate) input: Box<dyn BufRead>,

    /// Program output (`print_char`, `print_num`), flushed after every write
    pub(crate) output: Box<dyn Write>,

    /// Transcript of everything printed
    pub(crate) terminal: MockTerminal,

    /// Snapshot history; `None` when history recording is off
    snapshot_manager: Option<SnapshotManager>,

    /// Current position in execution history (for stepping backward/forward)
    history_position: usize,

    /// Set when a snapshot did not fit; cleared by history navigation
    history_full: bool,
}

impl Interpreter {
    /// Create an interpreter with empty input, discarded output and no history
    pub fn new(program: Program) -> Self {
        Interpreter {
            instructions: program.instructions.into(),
            stack: OperandStack::new(),
            heap: Heap::new(),
            call_stack: CallStack::new(),
            labels: LabelTable::new(),
            pc: 0,
            status: Status::Running,
            last_executed: None,
            input: Box::new(io::empty()),
            output: Box::new(io::sink()),
            terminal: MockTerminal::new(),
            snapshot_manager: None,
            history_position: 0,
            history_full: false,
        }
    }

    /// Attach program input and output streams
    pub fn with_io(mut self, input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        self.input = input;
        self.output = output;
        self
    }

    /// Record a snapshot after every instruction, up to `memory_limit` bytes
    pub fn with_history(mut self, memory_limit: usize) -> Self {
        self.snapshot_manager = Some(SnapshotManager::new(memory_limit));
        self
    }

    /// Run the program until it halts or fails
    pub fn run(&mut self) -> Result<HaltReason, RuntimeError> {
        loop {
            if let Status::Halted(reason) = self.step()? {
                return Ok(reason);
            }
        }
    }

    /// Execute exactly one instruction
    ///
    /// On error the program counter is left on the failing instruction.
    /// If the state after the instruction does not fit in the history, the
    /// machine is put back to the last recorded snapshot and further steps
    /// fail until history is navigated. Output already written to the
    /// attached writer is not taken back.
    pub fn step(&mut self) -> Result<Status, RuntimeError> {
        if self.history_full {
            return Err(self.snapshot_limit_error());
        }

        if self.snapshot_manager.as_ref().is_some_and(|m| m.is_empty()) {
            if self.pc >= self.instructions.len() {
                self.status = Status::Halted(HaltReason::EndOfProgram);
            }
            self.take_snapshot()?;
        }

        if let Status::Halted(_) = self.status {
            return Ok(self.status);
        }

        let program = Rc::clone(&self.instructions);
        let index = self.pc;
        let Some(instruction) = program.get(index) else {
            self.status = Status::Halted(HaltReason::EndOfProgram);
            return Ok(self.status);
        };

        self.pc += 1;
        if let Err(e) = self.execute(index, instruction) {
            self.pc = index;
            return Err(e);
        }
        self.last_executed = Some(index);

        if self.status == Status::Running && self.pc >= program.len() {
            self.status = Status::Halted(HaltReason::EndOfProgram);
        }

        if let Err(e) = self.take_snapshot() {
            self.restore_position(self.history_position)?;
            self.history_full = true;
            return Err(e);
        }
        Ok(self.status)
    }

    /// Dispatch one instruction to its group handler
    fn execute(&mut self, index: usize, instruction: &Instruction) -> Result<(), RuntimeError> {
        let site = InstructionSite {
            index,
            operation: instruction.operation,
            location: instruction.location,
        };
        let parameter = instruction.parameter.as_ref();

        match instruction.operation {
            Operation::Stack(op) => self.execute_stack(op, parameter, site),
            Operation::Arithmetic(op) => self.execute_arithmetic(op, site),
            Operation::Heap(op) => self.execute_heap(op, site),
            Operation::Flow(op) => self.execute_flow(op, parameter, site),
            Operation::Io(op) => self.execute_io(op, site),
        }
    }

    pub(crate) fn number_parameter<'a>(
        parameter: Option<&'a Parameter>,
        site: InstructionSite,
    ) -> Result<&'a Value, RuntimeError> {
        match parameter {
            Some(Parameter::Number(n)) => Ok(n),
            _ => Err(RuntimeError::MissingParameter { site }),
        }
    }

    pub(crate) fn label_parameter<'a>(
        parameter: Option<&'a Parameter>,
        site: InstructionSite,
    ) -> Result<&'a Label, RuntimeError> {
        match parameter {
            Some(Parameter::Label(label)) => Ok(label),
            _ => Err(RuntimeError::MissingParameter { site }),
        }
    }

    pub(crate) fn stack_error(fault: StackFault, site: InstructionSite) -> RuntimeError {
        match fault {
            StackFault::Underflow { needed, found } => RuntimeError::EmptyStack {
                needed,
                found,
                site,
            },
            StackFault::OutOfRange { index, depth } => RuntimeError::IndexOutOfRange {
                index: Value::from(index),
                depth,
                site,
            },
        }
    }

    /// Take a snapshot of the current execution state
    fn take_snapshot(&mut self) -> Result<(), RuntimeError> {
        let Some(manager) = self.snapshot_manager.as_mut() else {
            return Ok(());
        };

        let snapshot = Snapshot {
            stack: self.stack.clone(),
            heap: self.heap.clone(),
            call_stack: self.call_stack.clone(),
            pc: self.pc,
            last_executed: self.last_executed,
            output_len: self.terminal.len(),
            status: self.status,
        };

        // Executing from a rewound position replaces the old future
        if !manager.is_empty() {
            manager.truncate(self.history_position + 1);
        }

        if manager.push(snapshot).is_err() {
            return Err(self.snapshot_limit_error());
        }

        self.history_position = manager.len() - 1;
        Ok(())
    }

    fn snapshot_limit_error(&self) -> RuntimeError {
        let (current, limit) = self
            .snapshot_manager
            .as_ref()
            .map_or((0, 0), |m| (m.memory_usage(), m.memory_limit()));
        RuntimeError::SnapshotLimitExceeded { current, limit }
    }

    /// Restore execution state from a snapshot
    fn restore_snapshot(&mut self, snapshot: &Snapshot) {
        self.stack = snapshot.stack.clone();
        self.heap = snapshot.heap.clone();
        self.call_stack = snapshot.call_stack.clone();
        self.pc = snapshot.pc;
        self.last_executed = snapshot.last_executed;
        self.status = snapshot.status;
        self.terminal.rewind(snapshot.output_len);
    }

    fn restore_position(&mut self, position: usize) -> Result<(), RuntimeError> {
        let snapshot = self
            .snapshot_manager
            .as_ref()
            .and_then(|m| m.get(position))
            .cloned()
            .ok_or_else(|| RuntimeError::HistoryOperationFailed {
                message: "Snapshot not found in history".to_string(),
            })?;

        self.restore_snapshot(&snapshot);
        self.history_position = position;
        self.history_full = false;
        Ok(())
    }

    /// Step backward in execution (restore previous snapshot)
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "Already at the beginning of execution".to_string(),
            });
        }

        self.restore_position(self.history_position - 1)
    }

    /// Step forward in execution (restore next snapshot)
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position + 1 >= self.total_snapshots() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No more snapshots available (execution finished)".to_string(),
            });
        }

        self.restore_position(self.history_position + 1)
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        if self.total_snapshots() == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            });
        }

        self.restore_position(0)
    }

    /// Jump to the last recorded state
    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        match self.total_snapshots() {
            0 => Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            }),
            total => self.restore_position(total - 1),
        }
    }

    // ========== Getter methods for UI ==========

    /// Get the lexed program
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get a reference to the operand stack
    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    /// Get a reference to the heap
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Get a reference to the call stack
    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// Get a reference to the output transcript
    pub fn terminal(&self) -> &MockTerminal {
        &self.terminal
    }

    /// Index of the next instruction to execute
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Index of the instruction that produced the current state
    pub fn last_executed(&self) -> Option<usize> {
        self.last_executed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Get the current history position
    pub fn history_position(&self) -> usize {
        self.history_position
    }

    /// Get the total number of snapshots
    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.as_ref().map_or(0, SnapshotManager::len)
    }

    /// Check if execution has finished
    pub fn is_finished(&self) -> bool {
        matches!(self.status, Status::Halted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::instruction::{ArithmeticOp, FlowOp, IoOp, StackOp};

    fn push(n: i64) -> Instruction {
        Instruction::new(
            Operation::Stack(StackOp::Push),
            Some(Parameter::Number(Value::from(n))),
        )
    }

    fn op(operation: Operation) -> Instruction {
        Instruction::new(operation, None)
    }

    fn values(interpreter: &Interpreter) -> Vec<Value> {
        interpreter.stack().values().to_vec()
    }

    #[test]
    fn test_step_advances_pc() {
        let program = Program::new(vec![push(1), push(2)]);
        let mut interpreter = Interpreter::new(program);

        assert_eq!(interpreter.step(), Ok(Status::Running));
        assert_eq!(interpreter.pc(), 1);
        assert_eq!(
            interpreter.step(),
            Ok(Status::Halted(HaltReason::EndOfProgram))
        );
        assert_eq!(interpreter.pc(), 2);
        assert_eq!(values(&interpreter), vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_empty_program_halts() {
        let mut interpreter = Interpreter::new(Program::default());
        assert_eq!(interpreter.run(), Ok(HaltReason::EndOfProgram));
        assert!(interpreter.is_finished());
    }

    #[test]
    fn test_error_leaves_pc_on_failing_instruction() {
        let program = Program::new(vec![push(1), op(Operation::Arithmetic(ArithmeticOp::Add))]);
        let mut interpreter = Interpreter::new(program);

        let err = interpreter.run().unwrap_err();
        assert_eq!(err.site().map(|s| s.index), Some(1));
        assert_eq!(interpreter.pc(), 1);
        assert_eq!(values(&interpreter), vec![Value::from(1)]);
    }

    #[test]
    fn test_missing_parameter() {
        let program = Program::new(vec![op(Operation::Stack(StackOp::Push))]);
        let mut interpreter = Interpreter::new(program);
        assert!(matches!(
            interpreter.run(),
            Err(RuntimeError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_history_navigation() {
        let program = Program::new(vec![
            push(7),
            op(Operation::Io(IoOp::PrintNum)),
            op(Operation::Flow(FlowOp::Exit)),
        ]);
        let mut interpreter = Interpreter::new(program).with_history(1024 * 1024);

        assert_eq!(interpreter.run(), Ok(HaltReason::Exit));
        // Initial state plus one per instruction
        assert_eq!(interpreter.total_snapshots(), 4);
        assert_eq!(interpreter.history_position(), 3);
        assert_eq!(interpreter.terminal().output(), "7");

        interpreter.rewind_to_start().unwrap();
        assert_eq!(interpreter.pc(), 0);
        assert!(interpreter.stack().is_empty());
        assert_eq!(interpreter.terminal().output(), "");
        assert!(interpreter.step_backward().is_err());

        interpreter.step_forward().unwrap();
        assert_eq!(values(&interpreter), vec![Value::from(7)]);
        assert_eq!(interpreter.last_executed(), Some(0));

        interpreter.jump_to_end().unwrap();
        assert_eq!(interpreter.status(), Status::Halted(HaltReason::Exit));
        assert_eq!(interpreter.terminal().output(), "7");
        assert!(interpreter.step_forward().is_err());
    }

    #[test]
    fn test_history_limit() {
        let program = Program::new((0..100).map(push).collect());
        let mut interpreter = Interpreter::new(program).with_history(512);
        assert!(matches!(
            interpreter.run(),
            Err(RuntimeError::SnapshotLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_history_limit_keeps_last_recorded_state() {
        let program = Program::new((0..100).map(push).collect());
        let mut interpreter = Interpreter::new(program).with_history(512);
        assert!(interpreter.run().is_err());

        let last = interpreter.total_snapshots() - 1;
        assert!(last > 0);
        assert_eq!(interpreter.history_position(), last);
        let recorded = interpreter
            .snapshot_manager
            .as_ref()
            .and_then(|m| m.get(last))
            .cloned()
            .unwrap();
        assert_eq!(interpreter.pc(), recorded.pc);
        assert_eq!(interpreter.stack().depth(), recorded.stack.depth());
        assert_eq!(interpreter.pc(), last);

        // Nothing more runs unrecorded
        assert!(matches!(
            interpreter.run(),
            Err(RuntimeError::SnapshotLimitExceeded { .. })
        ));
        assert_eq!(interpreter.pc(), last);
        assert_eq!(interpreter.stack().depth(), last);
        assert_eq!(interpreter.total_snapshots(), last + 1);

        // Rewinding frees the recorded future, so stepping works again
        interpreter.rewind_to_start().unwrap();
        assert_eq!(interpreter.step(), Ok(Status::Running));
        assert_eq!(interpreter.total_snapshots(), 2);
        assert_eq!(interpreter.pc(), 1);
    }

    #[test]
    fn test_empty_program_records_single_snapshot() {
        let mut interpreter = Interpreter::new(Program::default()).with_history(1024 * 1024);
        assert_eq!(interpreter.run(), Ok(HaltReason::EndOfProgram));
        assert_eq!(interpreter.total_snapshots(), 1);
        assert_eq!(interpreter.history_position(), 0);

        interpreter.rewind_to_start().unwrap();
        assert_eq!(interpreter.status(), Status::Halted(HaltReason::EndOfProgram));
    }

    #[test]
    fn test_no_history_by_default() {
        let mut interpreter = Interpreter::new(Program::new(vec![push(1)]));
        interpreter.run().unwrap();
        assert_eq!(interpreter.total_snapshots(), 0);
        assert!(interpreter.rewind_to_start().is_err());
    }
}
