// Arithmetic semantics: floored division, divisor-signed modulo, big values

mod common;

use common::*;
use num_bigint::BigInt;
use wstty::interpreter::errors::RuntimeError;
use wstty::parser::instruction::Symbol;
use wstty::parser::literal::{decode_number, encode_number};

fn eval(left: i64, right: i64, op: &str) -> Result<String, RuntimeError> {
    let source = program(&[&push(left), &push(right), op, PRINT_NUM]);
    let outcome = run(&source);
    outcome.result.map(|_| outcome.output)
}

#[test]
fn test_basic_operations() {
    assert_eq!(eval(7, 3, ADD).unwrap(), "10");
    assert_eq!(eval(7, 3, SUB).unwrap(), "4");
    assert_eq!(eval(3, 7, SUB).unwrap(), "-4");
    assert_eq!(eval(-6, 7, MUL).unwrap(), "-42");
}

#[test]
fn test_division_rounds_toward_negative_infinity() {
    assert_eq!(eval(7, 2, DIV).unwrap(), "3");
    assert_eq!(eval(-7, 2, DIV).unwrap(), "-4");
    assert_eq!(eval(7, -2, DIV).unwrap(), "-4");
    assert_eq!(eval(-7, -2, DIV).unwrap(), "3");
}

#[test]
fn test_modulo_takes_sign_of_divisor() {
    assert_eq!(eval(7, 3, MOD).unwrap(), "1");
    assert_eq!(eval(-7, 3, MOD).unwrap(), "2");
    assert_eq!(eval(7, -3, MOD).unwrap(), "-2");
    assert_eq!(eval(-7, -3, MOD).unwrap(), "-1");
    assert_eq!(eval(6, -3, MOD).unwrap(), "0");
}

#[test]
fn test_division_by_zero_is_fatal() {
    for op in [DIV, MOD] {
        let source = program(&[&push(5), &push(0), op]);
        let outcome = run(&source);
        match &outcome.result {
            Err(RuntimeError::DivisionByZero { site }) => assert_eq!(site.index, 2),
            other => panic!("expected DivisionByZero, got {:?}", other),
        }
        // Operands are still on the stack
        assert_eq!(
            outcome.interpreter.stack().values(),
            &[BigInt::from(5), BigInt::from(0)]
        );
    }
}

#[test]
fn test_values_beyond_machine_words() {
    // (2^62 * 2^62) overflows i64 but not the interpreter
    let source = program(&[
        &push(1 << 62),
        DUP,
        MUL,
        DUP,
        PRINT_NUM,
        &push(1 << 62),
        DIV,
        PRINT_NUM,
    ]);
    let outcome = run(&source);
    let square = BigInt::from(1i64 << 62) * BigInt::from(1i64 << 62);
    assert_eq!(
        outcome.output,
        format!("{}{}", square, BigInt::from(1i64 << 62))
    );
}

#[test]
fn test_number_encoding_round_trip() {
    let big = BigInt::from(1) << 200u32;
    let samples = [
        BigInt::from(0),
        BigInt::from(1),
        BigInt::from(-1),
        BigInt::from(i64::MAX),
        BigInt::from(i64::MIN),
        big.clone(),
        -big,
    ];
    for value in samples {
        let encoded = encode_number(&value);
        let (terminator, run) = encoded.split_last().unwrap();
        assert_eq!(*terminator, Symbol::LineFeed);
        // Magnitude bits survive, not just the sign
        assert_eq!(decode_number(run), Some(value));
    }
}

#[test]
fn test_large_literal_pushes_exactly() {
    let source = program(&[&push(-987_654_321_012), PRINT_NUM]);
    assert_eq!(run(&source).output, "-987654321012");
}
