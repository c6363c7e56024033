use std::fmt;

/// Errors that can occur during parsing and evaluation
///
/// The taxonomy is closed: every failure the crate can report is one of
/// these variants, each with a fixed human-readable message. Errors are
/// returned as data; nothing panics across the public boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    // Parsing errors
    /// A character outside the recognized input alphabet
    UnknownCharacter,
    /// Unbalanced or misplaced parentheses
    IncorrectParenthesesSequence,
    /// An operator or function in a position where it cannot apply
    IncorrectMethodSequence,
    /// A second decimal point inside one numeric literal
    IncorrectPointPlacement,
    /// Nothing to parse
    EmptyInput,

    // Evaluation errors (domain predicate failures)
    DivisionByZero,
    /// Factorial of a negative, fractional, or over-limit argument
    IllegalFactorial,
    /// Logarithm with base <= 0, base = 1, or argument <= 0
    IllegalLogarithm,
    /// Tangent (or tanh) where the companion cosine vanishes
    IllegalTangent,
    /// Cotangent (or coth) where the companion sine vanishes
    IllegalCotangent,
    /// Arcsine argument outside [-1, 1]
    IllegalAsin,
    /// Arccosine argument outside [-1, 1]
    IllegalAcos,

    // Internal-invariant violations, not user errors
    /// A numeric method failed despite a passed domain predicate
    FailedToProcess,
    /// Missing predicate/error wiring; reaching this is a defect
    UnknownError,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CalcError::UnknownCharacter => "Unknown character in expression",
            CalcError::IncorrectParenthesesSequence => "Incorrect parentheses sequence",
            CalcError::IncorrectMethodSequence => "Incorrect method sequence",
            CalcError::IncorrectPointPlacement => "Incorrect point placement",
            CalcError::EmptyInput => "Empty input",
            CalcError::DivisionByZero => "Division by zero",
            CalcError::IllegalFactorial => "Illegal factorial argument",
            CalcError::IllegalLogarithm => "Illegal logarithm argument",
            CalcError::IllegalTangent => "Illegal tangent argument",
            CalcError::IllegalCotangent => "Illegal cotangent argument",
            CalcError::IllegalAsin => "Illegal arcsine argument",
            CalcError::IllegalAcos => "Illegal arccosine argument",
            CalcError::FailedToProcess => "Failed to process expression",
            CalcError::UnknownError => "Unknown error",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for CalcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_fixed() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(CalcError::EmptyInput.to_string(), "Empty input");
        assert_eq!(
            CalcError::IncorrectParenthesesSequence.to_string(),
            "Incorrect parentheses sequence"
        );
    }
}
