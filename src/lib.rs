//! # treecalc
//!
//! Arbitrary-precision arithmetic calculator built on an incremental
//! tree-rebalancing parser.
//!
//! Expressions are parsed one character at a time into a single expression
//! tree that is reshaped as each operator arrives; there is no token stream.
//! Rational arithmetic is exact, transcendental functions are computed to
//! 100 significant digits, and independent subtrees evaluate in parallel on
//! the rayon pool.
//!
//! ## Quick start
//!
//! ```
//! use treecalc::calculate;
//!
//! assert_eq!(calculate("2 + 2 * 2")?, "6");
//! assert_eq!(calculate("0.1 + 0.2")?, "0.3");
//! assert_eq!(calculate("(1+2)!")?, "6");
//! assert!(calculate("sin(pi/2)")?.starts_with('1'));
//! # Ok::<(), treecalc::CalcError>(())
//! ```
//!
//! ## Notation
//!
//! Natural infix notation with `+ - * / ^ !`, parentheses, implicit
//! multiplication (`2(3+4)`, `2pi`), the constants `pi` and `e`, and the
//! functions `sin cos tan ctg` (with `a`/`h` variants), `log(base)(arg)`,
//! `ln`, `lg`. Case and whitespace are ignored.

mod ast;
mod builder;
mod error;
mod eval;
mod parser;
mod value;

#[cfg(test)]
mod tests;

pub use ast::{Node, OpKind};
pub use builder::Calc;
pub use error::CalcError;
pub use eval::{evaluate, EvalConfig};
pub use parser::parse;
pub use value::{euler, pi, Decimal, PRECISION};

/// Default ceiling for factorial arguments (2^28)
pub const DEFAULT_FACTORIAL_LIMIT: u64 = 268_435_456;

/// Evaluate an expression with default settings.
///
/// # Arguments
/// * `input` - Expression in natural notation
///
/// # Returns
/// The result rendered in canonical decimal form, or the first parse or
/// evaluation error.
///
/// # Example
/// ```
/// use treecalc::calculate;
///
/// assert_eq!(calculate("2^10")?, "1024");
/// # Ok::<(), treecalc::CalcError>(())
/// ```
pub fn calculate(input: &str) -> Result<String, CalcError> {
    Calc::new().evaluate(input)
}
