//! Layer collection for parenthesized subexpressions
//!
//! When the builder meets `(` it hands the rest of the input to
//! [`collect_layer`], which splits off everything up to the matching `)`.
//! The inner slice is parsed recursively into its own tree; the builder
//! then continues after the closing parenthesis. Depth counting is the
//! only state, so nesting costs one integer.

use crate::error::CalcError;

/// Split `rest` (the input directly after an opening parenthesis) into the
/// inner layer and the tail after the matching closing parenthesis.
///
/// # Arguments
/// * `rest` - Input following a `(` that has already been consumed
///
/// # Returns
/// `(inner, tail)` on success, `IncorrectParenthesesSequence` when the
/// matching `)` is missing.
pub(crate) fn collect_layer(rest: &str) -> Result<(&str, &str), CalcError> {
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Ok((&rest[..i], &rest[i + 1..])),
            ')' => depth -= 1,
            _ => {}
        }
    }
    Err(CalcError::IncorrectParenthesesSequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_layer() {
        assert_eq!(collect_layer("1+2)*3"), Ok(("1+2", "*3")));
    }

    #[test]
    fn test_nested_layer() {
        assert_eq!(collect_layer("1*(2+3))^2"), Ok(("1*(2+3)", "^2")));
        assert_eq!(collect_layer("((1))) tail"), Ok(("((1))", " tail")));
    }

    #[test]
    fn test_empty_layer() {
        assert_eq!(collect_layer(")rest"), Ok(("", "rest")));
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(
            collect_layer("1+2"),
            Err(CalcError::IncorrectParenthesesSequence)
        );
        assert_eq!(
            collect_layer("(1+2)"),
            Err(CalcError::IncorrectParenthesesSequence)
        );
    }
}
