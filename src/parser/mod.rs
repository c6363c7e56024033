//! Parsing pipeline
//!
//! Three stages, each its own module:
//!
//! 1. [`normalize`] - rewrite the raw string into canonical form
//! 2. [`layer`] - split parenthesized subexpressions off the input
//! 3. [`tree`] - grow one expression tree character by character
//!
//! The output tree is complete (no `Empty` slots) or the pipeline returns
//! the first error it met.

mod layer;
mod normalize;
mod tree;

use crate::ast::Node;
use crate::error::CalcError;

/// Parse an expression in natural notation into its evaluation tree.
///
/// # Arguments
/// * `input` - Raw expression text, e.g. `"2 + sin(pi/2)"`
///
/// # Returns
/// The completed tree, or the parse error describing the first offending
/// construct.
///
/// # Example
/// ```
/// use treecalc::parse;
///
/// let tree = parse("1 + 2 * 3")?;
/// assert_eq!(tree.to_string(), "(1 + (2 * 3))");
/// # Ok::<(), treecalc::CalcError>(())
/// ```
pub fn parse(input: &str) -> Result<Node, CalcError> {
    let normalized = normalize::normalize(input);
    if normalized.is_empty() {
        return Err(CalcError::EmptyInput);
    }
    tree::build(&normalized)
}
