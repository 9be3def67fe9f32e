use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::{InstructionSite, RuntimeError};
use crate::memory::value::{as_index, Value};
use crate::parser::instruction::{Parameter, StackOp};

impl Interpreter {
    pub(crate) fn execute_stack(
        &mut self,
        op: StackOp,
        parameter: Option<&Parameter>,
        site: InstructionSite,
    ) -> Result<(), RuntimeError> {
        match op {
            StackOp::Push => {
                let value = Self::number_parameter(parameter, site)?.clone();
                self.stack.push(value);
                Ok(())
            }
            StackOp::Duplicate => self
                .stack
                .copy(0)
                .map_err(|fault| Self::stack_error(fault, site)),
            StackOp::DuplicateN => {
                let n = self.stack_count(parameter, site)?;
                self.stack
                    .copy(n)
                    .map_err(|fault| Self::stack_error(fault, site))
            }
            StackOp::Swap => self
                .stack
                .swap()
                .map_err(|fault| Self::stack_error(fault, site)),
            StackOp::Discard => self
                .stack
                .pop()
                .map(|_| ())
                .map_err(|fault| Self::stack_error(fault, site)),
            StackOp::DiscardN => {
                let n = self.stack_count(parameter, site)?;
                self.stack
                    .slide(n)
                    .map_err(|fault| Self::stack_error(fault, site))
            }
        }
    }

    /// Decode the count of `duplicate_n`/`discard_n`
    fn stack_count(
        &self,
        parameter: Option<&Parameter>,
        site: InstructionSite,
    ) -> Result<usize, RuntimeError> {
        let count: &Value = Self::number_parameter(parameter, site)?;
        if self.stack.is_empty() {
            return Err(RuntimeError::EmptyStack {
                needed: 1,
                found: 0,
                site,
            });
        }
        as_index(count).ok_or_else(|| RuntimeError::IndexOutOfRange {
            index: count.clone(),
            depth: self.stack.depth(),
            site,
        })
    }
}
