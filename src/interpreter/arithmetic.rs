//! Arithmetic instructions
//!
//! Division is floored: the quotient rounds toward negative infinity and the
//! remainder takes the sign of the divisor, so `l == (l div r) * r + (l mod r)`
//! always holds.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::{InstructionSite, RuntimeError};
use crate::parser::instruction::ArithmeticOp;
use num_integer::Integer;
use num_traits::Zero;

impl Interpreter {
    pub(crate) fn execute_arithmetic(
        &mut self,
        op: ArithmeticOp,
        site: InstructionSite,
    ) -> Result<(), RuntimeError> {
        let depth = self.stack.depth();
        if depth < 2 {
            return Err(RuntimeError::EmptyStack {
                needed: 2,
                found: depth,
                site,
            });
        }

        if matches!(op, ArithmeticOp::Div | ArithmeticOp::Mod)
            && self.stack.peek().is_some_and(Zero::is_zero)
        {
            return Err(RuntimeError::DivisionByZero { site });
        }

        let (left, right) = self
            .stack
            .pop_pair()
            .map_err(|fault| Self::stack_error(fault, site))?;

        let result = match op {
            ArithmeticOp::Add => left + right,
            ArithmeticOp::Sub => left - right,
            ArithmeticOp::Mul => left * right,
            ArithmeticOp::Div => left.div_floor(&right),
            ArithmeticOp::Mod => left.mod_floor(&right),
        };

        self.stack.push(result);
        Ok(())
    }
}
