//! End-to-end tests of [`calculate`]: one string in, one string (or one
//! fixed error) out.

use crate::{calculate, CalcError};

#[test]
fn test_literal_round_trip() {
    assert_eq!(calculate("0"), Ok("0".into()));
    assert_eq!(calculate("42"), Ok("42".into()));
    assert_eq!(calculate("3.14"), Ok("3.14".into()));
    assert_eq!(calculate("0.500"), Ok("0.5".into()));
    assert_eq!(calculate(".5"), Ok("0.5".into()));
    assert_eq!(calculate("1."), Ok("1".into()));
}

#[test]
fn test_precedence() {
    assert_eq!(calculate("1+2*3"), Ok("7".into()));
    assert_eq!(calculate("(1+2)*3"), Ok("9".into()));
    assert_eq!(calculate("10-2-3"), Ok("5".into()));
    assert_eq!(calculate("2+3*4^2"), Ok("50".into()));
}

#[test]
fn test_power_right_associative() {
    assert_eq!(calculate("2^3^2"), Ok("512".into()));
    assert_eq!(calculate("(2^3)^2"), Ok("64".into()));
}

#[test]
fn test_implicit_multiplication() {
    assert_eq!(calculate("2(2+3)"), Ok("10".into()));
    assert_eq!(calculate("(1+1)(2+2)"), Ok("8".into()));
    let two_pi = calculate("2pi").unwrap();
    assert!(two_pi.starts_with("6.28318530717958647692"), "{two_pi}");
}

#[test]
fn test_exact_decimal_arithmetic() {
    assert_eq!(calculate("0.1+0.2"), Ok("0.3".into()));
    assert_eq!(calculate("1/4"), Ok("0.25".into()));
    assert_eq!(calculate("0.3-0.1"), Ok("0.2".into()));
}

#[test]
fn test_sign_handling() {
    assert_eq!(calculate("(-2)^2"), Ok("4".into()));
    assert_eq!(calculate("-2^2"), Ok("-4".into()));
    assert_eq!(calculate("2^-2"), Ok("0.25".into()));
    assert_eq!(calculate("-2"), Ok("-2".into()));
    assert_eq!(calculate("2*-3"), Ok("-6".into()));
    // unparenthesized sign directly before a function name is the documented
    // rejection
    assert_eq!(calculate("-sin 1"), Err(CalcError::IncorrectMethodSequence));
    assert_eq!(calculate("-(sin 1)").map(|s| s.starts_with("-0.8414")), Ok(true));
}

#[test]
fn test_constants() {
    let pi = calculate("pi").unwrap();
    assert!(pi.starts_with("3.14159265358979323846"), "{pi}");
    let e = calculate("e").unwrap();
    assert!(e.starts_with("2.71828182845904523536"), "{e}");
    assert_eq!(calculate("ln(e)"), Ok("1".into()));
}

#[test]
fn test_functions() {
    let sin1 = calculate("sin(1)").unwrap();
    assert!(sin1.starts_with("0.841470984807896506"), "{sin1}");
    assert_eq!(calculate("log(2)(8)"), Ok("3".into()));
    assert_eq!(calculate("lg1000"), Ok("3".into()));
    let root = calculate("2^0.5").unwrap();
    assert!(root.starts_with("1.41421356237309504880"), "{root}");
}

#[test]
fn test_factorial() {
    assert_eq!(calculate("5!"), Ok("120".into()));
    assert_eq!(calculate("0!"), Ok("1".into()));
    assert_eq!(calculate("3!!"), Ok("720".into()));
    assert_eq!(calculate("(1+2)!"), Ok("6".into()));
    assert_eq!(calculate("(-1)!"), Err(CalcError::IllegalFactorial));
    assert_eq!(calculate("0.5!"), Err(CalcError::IllegalFactorial));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(calculate("1/0"), Err(CalcError::DivisionByZero));
    assert_eq!(calculate("0^-1"), Err(CalcError::DivisionByZero));
}

#[test]
fn test_domain_violations() {
    assert_eq!(calculate("log(1)(10)"), Err(CalcError::IllegalLogarithm));
    assert_eq!(calculate("log(2)(-8)"), Err(CalcError::IllegalLogarithm));
    assert_eq!(calculate("asin(2)"), Err(CalcError::IllegalAsin));
    assert_eq!(calculate("acos(2)"), Err(CalcError::IllegalAcos));
    assert_eq!(calculate("ctg(0)"), Err(CalcError::IllegalCotangent));
}

#[test]
fn test_parenthesis_mismatch() {
    assert_eq!(
        calculate("(1+2"),
        Err(CalcError::IncorrectParenthesesSequence)
    );
    assert_eq!(
        calculate("1+2)"),
        Err(CalcError::IncorrectParenthesesSequence)
    );
}

#[test]
fn test_malformed_sequences() {
    assert_eq!(calculate("2++3"), Err(CalcError::IncorrectMethodSequence));
    assert_eq!(calculate("2+"), Err(CalcError::IncorrectMethodSequence));
    assert_eq!(calculate("1.2.3"), Err(CalcError::IncorrectPointPlacement));
    assert_eq!(calculate("2%3"), Err(CalcError::UnknownCharacter));
}

#[test]
fn test_empty_input() {
    assert_eq!(calculate(""), Err(CalcError::EmptyInput));
    assert_eq!(calculate("   "), Err(CalcError::EmptyInput));
    assert_eq!(calculate("()"), Err(CalcError::EmptyInput));
}

#[test]
fn test_whitespace_and_case_insensitive() {
    assert_eq!(calculate(" 1 +\t2 "), Ok("3".into()));
    assert_eq!(calculate("SIN(0)"), Ok("0".into()));
    assert_eq!(calculate("Pi").map(|s| s.starts_with("3.14")), Ok(true));
}

#[test]
fn test_error_messages_are_fixed_strings() {
    assert_eq!(
        calculate("1/0").unwrap_err().to_string(),
        "Division by zero"
    );
    assert_eq!(calculate("").unwrap_err().to_string(), "Empty input");
}
