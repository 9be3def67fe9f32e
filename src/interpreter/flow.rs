//! Flow control instructions
//!
//! Jumps set the program counter to the index of the target `label`
//! instruction. Since labels execute as no-ops, landing on one and falling
//! through is equivalent to landing on the instruction after it.

use crate::interpreter::engine::{HaltReason, Interpreter, Status};
use crate::interpreter::errors::{InstructionSite, RuntimeError};
use crate::memory::stack::CallFrame;
use crate::memory::value::Value;
use crate::parser::instruction::{FlowOp, Label, Parameter};
use num_traits::{Signed, Zero};

impl Interpreter {
    pub(crate) fn execute_flow(
        &mut self,
        op: FlowOp,
        parameter: Option<&Parameter>,
        site: InstructionSite,
    ) -> Result<(), RuntimeError> {
        match op {
            FlowOp::Label => {
                let label = Self::label_parameter(parameter, site)?;
                self.labels.record(label, site.index);
                Ok(())
            }
            FlowOp::Call => {
                let label = Self::label_parameter(parameter, site)?;
                let target = self.resolve_label(label, site)?;
                self.call_stack.push(CallFrame {
                    call_site: site.index,
                    return_pc: self.pc,
                    label: label.clone(),
                });
                self.pc = target;
                Ok(())
            }
            FlowOp::Jump => {
                let label = Self::label_parameter(parameter, site)?;
                self.pc = self.resolve_label(label, site)?;
                Ok(())
            }
            FlowOp::JumpZero => self.conditional_jump(parameter, site, Zero::is_zero),
            FlowOp::JumpNegative => self.conditional_jump(parameter, site, Signed::is_negative),
            FlowOp::Return => {
                let frame = self
                    .call_stack
                    .pop()
                    .ok_or(RuntimeError::CallStackUnderflow { site })?;
                self.pc = frame.return_pc;
                Ok(())
            }
            FlowOp::Exit => {
                self.status = Status::Halted(HaltReason::Exit);
                Ok(())
            }
        }
    }

    /// Pop the top value and jump if it satisfies `condition`
    ///
    /// The label is only resolved when the jump is taken.
    fn conditional_jump(
        &mut self,
        parameter: Option<&Parameter>,
        site: InstructionSite,
        condition: fn(&Value) -> bool,
    ) -> Result<(), RuntimeError> {
        let label = Self::label_parameter(parameter, site)?;
        let Some(top) = self.stack.peek() else {
            return Err(RuntimeError::EmptyStack {
                needed: 1,
                found: 0,
                site,
            });
        };

        let target = if condition(top) {
            Some(self.resolve_label(label, site)?)
        } else {
            None
        };

        self.stack
            .pop()
            .map_err(|fault| Self::stack_error(fault, site))?;
        if let Some(target) = target {
            self.pc = target;
        }
        Ok(())
    }

    fn resolve_label(
        &mut self,
        label: &Label,
        site: InstructionSite,
    ) -> Result<usize, RuntimeError> {
        self.labels
            .resolve(label, &self.instructions)
            .ok_or_else(|| RuntimeError::UndefinedLabel {
                label: label.clone(),
                site,
            })
    }
}
