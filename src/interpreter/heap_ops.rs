use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::{InstructionSite, RuntimeError};
use crate::parser::instruction::HeapOp;

impl Interpreter {
    pub(crate) fn execute_heap(
        &mut self,
        op: HeapOp,
        site: InstructionSite,
    ) -> Result<(), RuntimeError> {
        match op {
            // Stack holds [address, value] with the value on top
            HeapOp::Store => {
                let (address, value) = self
                    .stack
                    .pop_pair()
                    .map_err(|fault| Self::stack_error(fault, site))?;
                self.heap.store(address, value);
                Ok(())
            }
            HeapOp::Retrieve => {
                let Some(address) = self.stack.peek() else {
                    return Err(RuntimeError::EmptyStack {
                        needed: 1,
                        found: 0,
                        site,
                    });
                };
                let value = self.heap.retrieve(address).cloned().ok_or_else(|| {
                    RuntimeError::UndefinedHeapAddress {
                        address: address.clone(),
                        site,
                    }
                })?;
                self.stack
                    .pop()
                    .map_err(|fault| Self::stack_error(fault, site))?;
                self.stack.push(value);
                Ok(())
            }
        }
    }
}
