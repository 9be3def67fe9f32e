//! Input/output instructions
//!
//! Output goes to the attached writer, flushed after every instruction so
//! interactive prompts appear before a blocking read, and is mirrored into
//! the [`MockTerminal`](crate::snapshot::MockTerminal) transcript.
//!
//! `read_char` decodes one UTF-8 character; `read_num` consumes one line and
//! parses it as a decimal integer with an optional sign.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::{InstructionSite, RuntimeError};
use crate::memory::value::{as_char, Value};
use crate::parser::instruction::IoOp;
use std::io::{self, BufRead, Read, Write};

impl Interpreter {
    pub(crate) fn execute_io(
        &mut self,
        op: IoOp,
        site: InstructionSite,
    ) -> Result<(), RuntimeError> {
        match op {
            IoOp::PrintChar => {
                let ch = self.pending_char(site)?;
                self.pop_value(site)?;
                self.emit(ch.encode_utf8(&mut [0; 4]), site)
            }
            IoOp::PrintNum => {
                let value = self.pop_value(site)?;
                self.emit(&value.to_string(), site)
            }
            IoOp::ReadChar => {
                let ch = self.read_char(site)?;
                self.stack.push(Value::from(u32::from(ch)));
                Ok(())
            }
            IoOp::ReadNum => {
                let value = self.read_number(site)?;
                self.stack.push(value);
                Ok(())
            }
        }
    }

    /// The character on top of the stack, checked without popping it
    fn pending_char(&self, site: InstructionSite) -> Result<char, RuntimeError> {
        let top = self.stack.peek().ok_or(RuntimeError::EmptyStack {
            needed: 1,
            found: 0,
            site,
        })?;
        as_char(top).ok_or_else(|| RuntimeError::InvalidCharacter {
            value: top.clone(),
            site,
        })
    }

    fn pop_value(&mut self, site: InstructionSite) -> Result<Value, RuntimeError> {
        self.stack
            .pop()
            .map_err(|fault| Self::stack_error(fault, site))
    }

    fn emit(&mut self, text: &str, site: InstructionSite) -> Result<(), RuntimeError> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| io_error(e, site))?;
        self.terminal.print(text);
        Ok(())
    }

    fn read_char(&mut self, site: InstructionSite) -> Result<char, RuntimeError> {
        let first = {
            let buffer = self.input.fill_buf().map_err(|e| io_error(e, site))?;
            match buffer.first() {
                Some(&byte) => byte,
                None => return Err(RuntimeError::EndOfInput { site }),
            }
        };
        self.input.consume(1);

        let width = utf8_width(first);
        let mut bytes = [first, 0, 0, 0];
        if width > 1 {
            self.input
                .read_exact(&mut bytes[1..width])
                .map_err(|e| io_error(e, site))?;
        }

        let bytes = &bytes[..width.max(1)];
        std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| RuntimeError::InvalidCharacterInput {
                bytes: bytes.to_vec(),
                site,
            })
    }

    fn read_number(&mut self, site: InstructionSite) -> Result<Value, RuntimeError> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| io_error(e, site))?;
        if read == 0 {
            return Err(RuntimeError::EndOfInput { site });
        }

        let text = line.trim();
        let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RuntimeError::InvalidNumberInput {
                input: text.to_string(),
                site,
            });
        }
        let magnitude = digits
            .parse::<Value>()
            .map_err(|_| RuntimeError::InvalidNumberInput {
                input: text.to_string(),
                site,
            })?;
        Ok(if text.starts_with('-') { -magnitude } else { magnitude })
    }
}

/// Encoded length of a UTF-8 sequence from its lead byte (0 for a stray
/// continuation byte)
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn io_error(error: io::Error, site: InstructionSite) -> RuntimeError {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        RuntimeError::EndOfInput { site }
    } else {
        RuntimeError::Io {
            message: error.to_string(),
            site,
        }
    }
}
