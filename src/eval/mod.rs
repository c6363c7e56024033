//! Tree evaluation
//!
//! Walks the finished expression tree bottom-up. Sibling subtrees are
//! evaluated on the rayon pool with `join`, so the two halves of every
//! operator run concurrently; the left error wins when both fail. Every
//! operation checks its domain predicate before touching the numeric
//! method, which keeps NaN and infinity out of the tree entirely.

mod factorial;

use crate::ast::{Node, OpKind};
use crate::error::CalcError;
use crate::value::Decimal;
use crate::DEFAULT_FACTORIAL_LIMIT;

/// Evaluation limits
#[derive(Debug, Clone, Copy)]
pub struct EvalConfig {
    /// Largest argument `n` for which `n!` is computed
    pub factorial_limit: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            factorial_limit: DEFAULT_FACTORIAL_LIMIT,
        }
    }
}

/// Evaluate a completed expression tree.
///
/// # Arguments
/// * `node` - Tree produced by [`crate::parse`]
/// * `config` - Evaluation limits
///
/// # Returns
/// The exact-rational result, or the first domain error found.
pub fn evaluate(node: &Node, config: &EvalConfig) -> Result<Decimal, CalcError> {
    match node {
        // a complete tree has no empty slots; reaching one is a defect
        Node::Empty => Err(CalcError::UnknownError),
        Node::Number(lit) => Ok(lit.value().clone()),
        Node::Group(inner) => evaluate(inner, config),
        Node::Op { kind, left, right } => {
            let (l, r) = rayon::join(
                || evaluate(left, config),
                || evaluate(right, config),
            );
            apply(*kind, l?, r?, config)
        }
    }
}

fn apply(kind: OpKind, l: Decimal, r: Decimal, config: &EvalConfig) -> Result<Decimal, CalcError> {
    match kind {
        OpKind::Add => Ok(l + r),
        OpKind::Sub => Ok(l - r),
        OpKind::Mul => Ok(l * r),
        OpKind::Div => l.checked_div(&r).ok_or(CalcError::DivisionByZero),
        OpKind::Pow => pow(l, r),
        OpKind::Fact => {
            let n = l
                .to_u64()
                .filter(|&n| n <= config.factorial_limit)
                .ok_or(CalcError::IllegalFactorial)?;
            Ok(Decimal::from_bigint(factorial::factorial(n)))
        }
        OpKind::Log => {
            if !l.is_positive() || l.is_one() || !r.is_positive() {
                return Err(CalcError::IllegalLogarithm);
            }
            r.log_base(&l)
        }
        OpKind::Sin => r.sin(),
        OpKind::Cos => r.cos(),
        OpKind::Tan => {
            if r.cos()?.is_zero() {
                return Err(CalcError::IllegalTangent);
            }
            r.tan()
        }
        OpKind::Cot => {
            if r.sin()?.is_zero() {
                return Err(CalcError::IllegalCotangent);
            }
            r.cot()
        }
        OpKind::Asin => {
            if !r.magnitude_le_one() {
                return Err(CalcError::IllegalAsin);
            }
            r.asin()
        }
        OpKind::Acos => {
            if !r.magnitude_le_one() {
                return Err(CalcError::IllegalAcos);
            }
            r.acos()
        }
        OpKind::Atan => r.atan(),
        OpKind::Acot => r.acot(),
        OpKind::Sinh => r.sinh(),
        OpKind::Cosh => r.cosh(),
        OpKind::Tanh => {
            if r.cosh()?.is_zero() {
                return Err(CalcError::IllegalTangent);
            }
            r.tanh()
        }
        OpKind::Coth => {
            if r.sinh()?.is_zero() {
                return Err(CalcError::IllegalCotangent);
            }
            r.coth()
        }
    }
}

/// Integer exponents stay exact; everything else goes through the float
/// engine. `0` to a non-positive power and a negative base under a
/// fractional exponent have no value here.
fn pow(base: Decimal, exp: Decimal) -> Result<Decimal, CalcError> {
    if exp.is_integer() {
        if base.is_zero() && exp.is_negative() {
            return Err(CalcError::DivisionByZero);
        }
        if let Some(e) = exp.to_i32() {
            return Ok(base.pow_int(e));
        }
    }
    if base.is_zero() {
        return if exp.is_positive() {
            Ok(Decimal::zero())
        } else {
            Err(CalcError::DivisionByZero)
        };
    }
    if base.is_negative() {
        return Err(CalcError::FailedToProcess);
    }
    base.pow_float(&exp)
}
