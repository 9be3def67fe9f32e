//! Operand stack and call stack
//!
//! This module provides the two LIFO structures of the virtual machine:
//! - [`OperandStack`]: the value stack every instruction works on
//! - [`CallStack`]: return addresses pushed by `call` and popped by `return`
//!
//! # Failure Model
//!
//! Operand stack methods check their preconditions before touching any
//! slot and report a [`StackFault`]. A failed operation therefore leaves the
//! stack exactly as it was, which keeps the state shown after a runtime
//! error faithful to the moment of failure.

use super::value::{estimated_size, Value};
use crate::parser::instruction::Label;

/// Why an operand stack operation could not run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackFault {
    /// Fewer values than the operation consumes
    Underflow { needed: usize, found: usize },
    /// A positional operand reaches past the bottom of the stack
    OutOfRange { index: usize, depth: usize },
}

/// The operand stack (index 0 is the bottom)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperandStack {
    values: Vec<Value>,
}

impl OperandStack {
    pub fn new() -> Self {
        OperandStack { values: Vec::new() }
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> Result<Value, StackFault> {
        self.require(1)?;
        self.values.pop().ok_or(StackFault::Underflow {
            needed: 1,
            found: 0,
        })
    }

    /// Pop the two topmost values as `(left, right)`; `right` was on top
    pub fn pop_pair(&mut self) -> Result<(Value, Value), StackFault> {
        self.require(2)?;
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    /// Push a copy of the value `n` slots below the top (0 = top)
    pub fn copy(&mut self, n: usize) -> Result<(), StackFault> {
        self.require(1)?;
        let depth = self.depth();
        if n >= depth {
            return Err(StackFault::OutOfRange { index: n, depth });
        }
        let value = self.values[depth - 1 - n].clone();
        self.values.push(value);
        Ok(())
    }

    /// Exchange the two topmost values
    pub fn swap(&mut self) -> Result<(), StackFault> {
        self.require(2)?;
        let depth = self.depth();
        self.values.swap(depth - 1, depth - 2);
        Ok(())
    }

    /// Remove the `n` values directly below the top, keeping the top
    pub fn slide(&mut self, n: usize) -> Result<(), StackFault> {
        self.require(1)?;
        let depth = self.depth();
        if n > depth - 1 {
            return Err(StackFault::OutOfRange { index: n, depth });
        }
        self.values.drain(depth - 1 - n..depth - 1);
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values, bottom first (for UI display)
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn estimated_size(&self) -> usize {
        self.values.iter().map(estimated_size).sum()
    }

    fn require(&self, needed: usize) -> Result<(), StackFault> {
        let found = self.depth();
        if found < needed {
            Err(StackFault::Underflow { needed, found })
        } else {
            Ok(())
        }
    }
}

/// Activation record pushed by `call`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    /// Index of the `call` instruction itself
    pub call_site: usize,
    /// Where `return` resumes: the instruction after the call
    pub return_pc: usize,
    /// Label the call jumped to
    pub label: Label,
}

/// The call stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack { frames: Vec::new() }
    }

    pub fn push(&mut self, frame: CallFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }

    /// All frames, outermost first (for UI display)
    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(values: &[i64]) -> OperandStack {
        let mut stack = OperandStack::new();
        for &v in values {
            stack.push(Value::from(v));
        }
        stack
    }

    fn contents(stack: &OperandStack) -> Vec<i64> {
        stack
            .values()
            .iter()
            .map(|v| i64::try_from(v).unwrap())
            .collect()
    }

    #[test]
    fn test_copy_counts_from_top() {
        let mut stack = stack_of(&[10, 20, 30]);
        stack.copy(0).unwrap();
        stack.copy(3).unwrap();
        assert_eq!(contents(&stack), vec![10, 20, 30, 30, 10]);
    }

    #[test]
    fn test_copy_out_of_range() {
        let mut stack = stack_of(&[1, 2]);
        assert_eq!(
            stack.copy(2),
            Err(StackFault::OutOfRange { index: 2, depth: 2 })
        );
        assert_eq!(contents(&stack), vec![1, 2]);

        let mut empty = OperandStack::new();
        assert_eq!(
            empty.copy(0),
            Err(StackFault::Underflow {
                needed: 1,
                found: 0
            })
        );
    }

    #[test]
    fn test_swap_twice_is_identity() {
        let mut stack = stack_of(&[1, 2, 3]);
        stack.swap().unwrap();
        assert_eq!(contents(&stack), vec![1, 3, 2]);
        stack.swap().unwrap();
        assert_eq!(contents(&stack), vec![1, 2, 3]);
    }

    #[test]
    fn test_slide_keeps_top() {
        let mut stack = stack_of(&[1, 2, 3, 4]);
        stack.slide(2).unwrap();
        assert_eq!(contents(&stack), vec![1, 4]);
        stack.slide(0).unwrap();
        assert_eq!(contents(&stack), vec![1, 4]);
        assert_eq!(
            stack.slide(2),
            Err(StackFault::OutOfRange { index: 2, depth: 2 })
        );
        assert_eq!(contents(&stack), vec![1, 4]);
    }

    #[test]
    fn test_pop_pair_order_and_atomicity() {
        let mut stack = stack_of(&[7, 3]);
        let (left, right) = stack.pop_pair().unwrap();
        assert_eq!(left, Value::from(7));
        assert_eq!(right, Value::from(3));

        let mut single = stack_of(&[5]);
        assert_eq!(
            single.pop_pair(),
            Err(StackFault::Underflow {
                needed: 2,
                found: 1
            })
        );
        assert_eq!(contents(&single), vec![5]);
    }

    #[test]
    fn test_call_stack_is_lifo() {
        let mut calls = CallStack::new();
        for site in 0..3 {
            calls.push(CallFrame {
                call_site: site,
                return_pc: site + 1,
                label: Label::new(Vec::new()),
            });
        }
        assert_eq!(calls.depth(), 3);
        assert_eq!(calls.pop().map(|f| f.return_pc), Some(3));
        assert_eq!(calls.pop().map(|f| f.return_pc), Some(2));
        assert_eq!(calls.pop().map(|f| f.return_pc), Some(1));
        assert!(calls.pop().is_none());
    }
}
