//! Fluent calculator front-end
//!
//! [`Calc`] bundles parsing and evaluation behind a small builder so limits
//! can be adjusted per call site without threading a config through every
//! function.

use crate::error::CalcError;
use crate::eval::{self, EvalConfig};
use crate::parser;
use crate::value::Decimal;
use crate::DEFAULT_FACTORIAL_LIMIT;

/// Configurable calculator
///
/// # Example
/// ```
/// use treecalc::Calc;
///
/// let result = Calc::new().evaluate("2 + 2 * 2")?;
/// assert_eq!(result, "6");
///
/// let strict = Calc::new().factorial_limit(1000);
/// assert!(strict.evaluate("1001!").is_err());
/// # Ok::<(), treecalc::CalcError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Calc {
    factorial_limit: u64,
}

impl Default for Calc {
    fn default() -> Self {
        Calc {
            factorial_limit: DEFAULT_FACTORIAL_LIMIT,
        }
    }
}

impl Calc {
    pub fn new() -> Self {
        Calc::default()
    }

    /// Set the largest argument for which a factorial is computed
    pub fn factorial_limit(mut self, limit: u64) -> Self {
        self.factorial_limit = limit;
        self
    }

    /// Evaluate `input` and render the result in canonical decimal form.
    ///
    /// # Arguments
    /// * `input` - Expression in natural notation
    ///
    /// # Returns
    /// The rendered result, or the first parse or evaluation error.
    pub fn evaluate(&self, input: &str) -> Result<String, CalcError> {
        Ok(self.evaluate_decimal(input)?.to_string())
    }

    /// Evaluate `input` and keep the exact-rational result
    pub fn evaluate_decimal(&self, input: &str) -> Result<Decimal, CalcError> {
        let tree = parser::parse(input)?;
        let config = EvalConfig {
            factorial_limit: self.factorial_limit,
        };
        eval::evaluate(&tree, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let calc = Calc::new();
        assert_eq!(calc.factorial_limit, DEFAULT_FACTORIAL_LIMIT);
        assert_eq!(calc.evaluate("10!"), Ok("3628800".into()));
    }

    #[test]
    fn test_limit_override() {
        let calc = Calc::new().factorial_limit(5);
        assert_eq!(calc.evaluate("5!"), Ok("120".into()));
        assert_eq!(calc.evaluate("6!"), Err(CalcError::IllegalFactorial));
    }

    #[test]
    fn test_decimal_result() {
        let value = Calc::new().evaluate_decimal("1/3").unwrap();
        assert!(!value.is_integer());
        assert!(value.is_positive());
    }
}
