// Shared helpers for writing Whitespace programs in tests
//
// Programs are written in S/T/L notation: 'S' is a space, 'T' a tab and 'L' a
// line feed. Every other character (including real spaces) is dropped, so
// lowercase notes can sit next to the code.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;

use wstty::interpreter::engine::{HaltReason, Interpreter};
use wstty::interpreter::errors::RuntimeError;
use wstty::parser::parse_program;

/// Convert S/T/L notation into real whitespace
pub fn ws(notation: &str) -> String {
    notation
        .chars()
        .filter_map(|c| match c {
            'S' => Some(' '),
            'T' => Some('\t'),
            'L' => Some('\n'),
            _ => None,
        })
        .collect()
}

/// Sign + binary magnitude + terminator
pub fn num(n: i64) -> String {
    let sign = if n < 0 { "T" } else { "S" };
    let bits: String = if n == 0 {
        String::new()
    } else {
        format!("{:b}", n.unsigned_abs())
            .chars()
            .map(|c| if c == '1' { 'T' } else { 'S' })
            .collect()
    };
    format!("{}{}L", sign, bits)
}

pub fn push(n: i64) -> String {
    format!("SS{}", num(n))
}
pub const DUP: &str = "SLS";
pub fn dup_n(n: i64) -> String {
    format!("STS{}", num(n))
}
pub const SWAP: &str = "SLT";
pub const DISCARD: &str = "SLL";
pub fn discard_n(n: i64) -> String {
    format!("STL{}", num(n))
}

pub const ADD: &str = "TSSS";
pub const SUB: &str = "TSST";
pub const MUL: &str = "TSSL";
pub const DIV: &str = "TSTS";
pub const MOD: &str = "TSTT";

pub const STORE: &str = "TTS";
pub const RETRIEVE: &str = "TTT";

/// Labels are raw symbol runs ending in L, e.g. "ST"
pub fn label(name: &str) -> String {
    format!("LSS{}L", name)
}
pub fn call(name: &str) -> String {
    format!("LST{}L", name)
}
pub fn jump(name: &str) -> String {
    format!("LSL{}L", name)
}
pub fn jz(name: &str) -> String {
    format!("LTS{}L", name)
}
pub fn jn(name: &str) -> String {
    format!("LTT{}L", name)
}
pub const RET: &str = "LTL";
pub const EXIT: &str = "LLL";

pub const PRINT_CHAR: &str = "TLSS";
pub const PRINT_NUM: &str = "TLST";
pub const READ_CHAR: &str = "TLTS";
pub const READ_NUM: &str = "TLTT";

/// Join instruction fragments into whitespace source
pub fn program(parts: &[&str]) -> String {
    ws(&parts.concat())
}

/// Writer that keeps its bytes reachable after being boxed
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Result of running a program to completion
pub struct Outcome {
    pub result: Result<HaltReason, RuntimeError>,
    pub output: String,
    pub interpreter: Interpreter,
}

/// Lex and run `source`, feeding it `input`
pub fn run_with_input(source: &str, input: &str) -> Outcome {
    let program = parse_program(source).expect("Lexing failed");
    let output = SharedBuffer::default();
    let mut interpreter = Interpreter::new(program).with_io(
        Box::new(Cursor::new(input.as_bytes().to_vec())),
        Box::new(output.clone()),
    );
    let result = interpreter.run();
    Outcome {
        result,
        output: output.contents(),
        interpreter,
    }
}

pub fn run(source: &str) -> Outcome {
    run_with_input(source, "")
}
