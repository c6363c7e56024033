//! Incremental tree builder
//!
//! The parser keeps exactly one expression tree and reshapes it for every
//! character of the normalized input; there is no token stream and no
//! precedence climbing over a buffer. Two moves cover all of arithmetic:
//!
//! * **push** - the finished tree becomes the left operand of the arriving
//!   operator, which starts a fresh node above it;
//! * **fall** - an operator that binds tighter than the root descends into
//!   the right branch and pushes there, so `1+2*3` grows into
//!   `1+(2*3)` one character at a time.
//!
//! `^` additionally falls through `^` itself, which makes exponentiation
//! right-associative. Parenthesized layers are split off by the layer
//! collector and built recursively into [`Node::Group`] values. Letters
//! accumulate in a pending-name buffer until a non-letter forces them to
//! resolve into a function node.

use std::mem;

use crate::ast::{Node, NumberLit, OpKind};
use crate::error::CalcError;
use crate::parser::layer;
use crate::value;

/// Build the expression tree for one normalized layer.
///
/// Called recursively for every parenthesized subexpression, so each layer
/// is checked for completeness on its own: an operator left dangling inside
/// a group fails here, not at evaluation.
pub(crate) fn build(input: &str) -> Result<Node, CalcError> {
    let tree = build_partial(input)?;
    if matches!(tree, Node::Empty) {
        return Err(CalcError::EmptyInput);
    }
    check_complete(&tree)?;
    Ok(tree)
}

fn build_partial(input: &str) -> Result<Node, CalcError> {
    let mut state = Builder::new();
    let mut rest = input;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '0'..='9' => state.digit(c as u32 - '0' as u32)?,
            '.' => state.point()?,
            '(' => {
                let (inner, tail) = layer::collect_layer(rest)?;
                let sub = build(inner)?;
                state.value(Node::group(sub))?;
                rest = tail;
            }
            ')' => return Err(CalcError::IncorrectParenthesesSequence),
            '+' => state.binary(OpKind::Add)?,
            '-' => state.binary(OpKind::Sub)?,
            '*' => state.binary(OpKind::Mul)?,
            '/' => state.binary(OpKind::Div)?,
            '^' => state.binary(OpKind::Pow)?,
            '!' => state.postfix()?,
            'e' => state.value(Node::constant(value::euler()))?,
            'p' => state.value(Node::constant(value::pi()))?,
            's' | 'c' | 't' | 'a' | 'h' | 'l' => state.name_letter(c)?,
            _ => return Err(CalcError::UnknownCharacter),
        }
    }
    state.finish()
}

/// One tree plus the transient function-name buffer
struct Builder {
    tree: Node,
    pending: String,
}

impl Builder {
    fn new() -> Self {
        Builder {
            tree: Node::Empty,
            pending: String::new(),
        }
    }

    fn take_tree(&mut self) -> Node {
        mem::replace(&mut self.tree, Node::Empty)
    }

    fn digit(&mut self, d: u32) -> Result<(), CalcError> {
        self.resolve_pending()?;
        let tree = self.take_tree();
        self.tree = append_digit(tree, d)?;
        Ok(())
    }

    fn point(&mut self) -> Result<(), CalcError> {
        self.resolve_pending()?;
        let tree = self.take_tree();
        self.tree = append_point(tree)?;
        Ok(())
    }

    fn value(&mut self, v: Node) -> Result<(), CalcError> {
        self.resolve_pending()?;
        let tree = self.take_tree();
        self.tree = append_value(tree, v)?;
        Ok(())
    }

    fn binary(&mut self, kind: OpKind) -> Result<(), CalcError> {
        self.resolve_pending()?;
        let tree = self.take_tree();
        self.tree = append_binary(tree, kind)?;
        Ok(())
    }

    fn postfix(&mut self) -> Result<(), CalcError> {
        self.resolve_pending()?;
        let tree = self.take_tree();
        self.tree = append_postfix(tree)?;
        Ok(())
    }

    /// Accumulate one function-name letter; the buffer must stay a prefix
    /// of some known name at every step
    fn name_letter(&mut self, c: char) -> Result<(), CalcError> {
        self.pending.push(c);
        if !is_name_prefix(&self.pending) {
            return Err(CalcError::UnknownCharacter);
        }
        Ok(())
    }

    /// A non-letter arrived: the buffered name must now resolve exactly
    fn resolve_pending(&mut self) -> Result<(), CalcError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = mem::take(&mut self.pending);
        let node = resolve_name(&text)?;
        let tree = self.take_tree();
        self.tree = append_value(tree, node)?;
        Ok(())
    }

    fn finish(mut self) -> Result<Node, CalcError> {
        self.resolve_pending()?;
        Ok(self.tree)
    }
}

const NAMES: [&str; 13] = [
    "s", "c", "t", "ct", "as", "ac", "at", "act", "sh", "ch", "th", "cth", "l",
];

fn is_name_prefix(text: &str) -> bool {
    NAMES.iter().any(|n| n.starts_with(text))
}

fn resolve_name(text: &str) -> Result<Node, CalcError> {
    let kind = match text {
        "s" => OpKind::Sin,
        "c" => OpKind::Cos,
        "t" => OpKind::Tan,
        "ct" => OpKind::Cot,
        "as" => OpKind::Asin,
        "ac" => OpKind::Acos,
        "at" => OpKind::Atan,
        "act" => OpKind::Acot,
        "sh" => OpKind::Sinh,
        "ch" => OpKind::Cosh,
        "th" => OpKind::Tanh,
        "cth" => OpKind::Coth,
        "l" => return Ok(Node::log()),
        _ => return Err(CalcError::IncorrectMethodSequence),
    };
    Ok(Node::unary(kind))
}

/// Whether an appender keeps descending into this operator's right branch.
/// Factorials and function nodes with a filled argument are finished
/// values; whatever arrives next to them multiplies implicitly instead.
fn descends_right(kind: OpKind, right: &Node) -> bool {
    if kind == OpKind::Fact {
        return false;
    }
    if (kind.is_unary() || kind == OpKind::Log) && !matches!(right, Node::Empty) {
        return false;
    }
    true
}

/// Fresh function node still waiting for its argument
fn is_open_function(node: &Node) -> bool {
    match node {
        Node::Op { kind, right, .. } if kind.is_unary() || *kind == OpKind::Log => {
            matches!(**right, Node::Empty)
        }
        _ => false,
    }
}

fn is_synthetic_zero(node: &Node) -> bool {
    matches!(node, Node::Number(lit) if lit.is_synthetic())
}

fn append_digit(node: Node, d: u32) -> Result<Node, CalcError> {
    match node {
        Node::Empty => {
            let mut lit = NumberLit::open();
            lit.push_digit(d);
            Ok(Node::Number(lit))
        }
        Node::Number(mut lit) if lit.is_open() => {
            lit.push_digit(d);
            Ok(Node::Number(lit))
        }
        Node::Op { kind, left, right } if kind == OpKind::Log && matches!(*right, Node::Empty) => {
            // digits before the argument layer extend the base
            Ok(Node::Op {
                kind,
                left: Box::new(append_digit(*left, d)?),
                right,
            })
        }
        Node::Op { kind, left, right } if descends_right(kind, &right) => Ok(Node::Op {
            kind,
            left,
            right: Box::new(append_digit(*right, d)?),
        }),
        node => {
            // closed value directly followed by a digit: implicit multiplication
            let mut lit = NumberLit::open();
            lit.push_digit(d);
            Ok(Node::binary(OpKind::Mul, node, Node::Number(lit)))
        }
    }
}

fn append_point(node: Node) -> Result<Node, CalcError> {
    match node {
        Node::Empty => {
            // leading point: ".5" reads as 0.5
            let mut lit = NumberLit::open();
            lit.push_point()?;
            Ok(Node::Number(lit))
        }
        Node::Number(mut lit) if lit.is_open() => {
            lit.push_point()?;
            Ok(Node::Number(lit))
        }
        Node::Op { kind, left, right } if kind == OpKind::Log && matches!(*right, Node::Empty) => {
            Ok(Node::Op {
                kind,
                left: Box::new(append_point(*left)?),
                right,
            })
        }
        Node::Op { kind, left, right } if descends_right(kind, &right) => Ok(Node::Op {
            kind,
            left,
            right: Box::new(append_point(*right)?),
        }),
        _ => Err(CalcError::IncorrectPointPlacement),
    }
}

fn append_value(node: Node, v: Node) -> Result<Node, CalcError> {
    match node {
        Node::Empty => Ok(v),
        Node::Op { kind, left, right } if kind == OpKind::Log && matches!(*right, Node::Empty) => {
            // the first layer after a bare log is its base, the second its
            // argument
            if matches!(*left, Node::Empty) {
                Ok(Node::Op {
                    kind,
                    left: Box::new(v),
                    right,
                })
            } else {
                Ok(Node::Op {
                    kind,
                    left,
                    right: Box::new(v),
                })
            }
        }
        Node::Op { kind, left, right }
            if kind == OpKind::Sub
                && matches!(*right, Node::Empty)
                && is_synthetic_zero(&left)
                && is_open_function(&v) =>
        {
            // a function may not directly fill the operand of a leading sign;
            // "-lg100" needs parentheses around the function call
            Err(CalcError::IncorrectMethodSequence)
        }
        Node::Op { kind, left, right } if descends_right(kind, &right) => Ok(Node::Op {
            kind,
            left,
            right: Box::new(append_value(*right, v)?),
        }),
        node => Ok(Node::binary(OpKind::Mul, node, v)),
    }
}

fn append_binary(node: Node, kind: OpKind) -> Result<Node, CalcError> {
    match node {
        Node::Empty => {
            // leading sign: subtraction (or addition) from a synthetic zero
            if matches!(kind, OpKind::Add | OpKind::Sub) {
                Ok(Node::Op {
                    kind,
                    left: Box::new(Node::Number(NumberLit::sign_zero())),
                    right: Box::new(Node::Empty),
                })
            } else {
                Err(CalcError::IncorrectMethodSequence)
            }
        }
        Node::Op {
            kind: top,
            left,
            right,
        } if falls_into(top, kind) => Ok(Node::Op {
            kind: top,
            left,
            right: Box::new(append_binary(*right, kind)?),
        }),
        node => {
            // push: the finished tree becomes the new operator's left operand
            check_complete(&node)?;
            Ok(Node::binary(kind, node, Node::Empty))
        }
    }
}

/// Whether a freshly appended operator descends into the right branch
/// instead of pushing the whole node down. `^` on `^` falls, which yields
/// right associativity.
fn falls_into(top: OpKind, new: OpKind) -> bool {
    new.precedence() > top.precedence() || (top == OpKind::Pow && new == OpKind::Pow)
}

fn append_postfix(node: Node) -> Result<Node, CalcError> {
    match node {
        Node::Empty => Err(CalcError::IncorrectMethodSequence),
        Node::Op { kind, left, right } if kind == OpKind::Log && matches!(*right, Node::Empty) => {
            Ok(Node::Op {
                kind,
                left: Box::new(append_postfix(*left)?),
                right,
            })
        }
        Node::Op { kind, left, right } if descends_right(kind, &right) => Ok(Node::Op {
            kind,
            left,
            right: Box::new(append_postfix(*right)?),
        }),
        node => Ok(Node::factorial(node)),
    }
}

/// Every operand slot must be filled before a tree may leave its layer
fn check_complete(node: &Node) -> Result<(), CalcError> {
    match node {
        Node::Empty => Err(CalcError::IncorrectMethodSequence),
        Node::Number(_) => Ok(()),
        Node::Group(inner) => check_complete(inner),
        Node::Op { left, right, .. } => {
            check_complete(left)?;
            check_complete(right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(input: &str) -> String {
        build(input).map(|t| t.to_string()).unwrap_or_else(|e| panic!("{input}: {e}"))
    }

    fn fails(input: &str) -> CalcError {
        match build(input) {
            Ok(t) => panic!("{input} unexpectedly built {t}"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_precedence_fall() {
        assert_eq!(shape("1+2*3"), "(1 + (2 * 3))");
        assert_eq!(shape("1*2+3"), "((1 * 2) + 3)");
        assert_eq!(shape("1+2*3^2"), "(1 + (2 * (3 ^ 2)))");
        assert_eq!(shape("1-2-3"), "((1 - 2) - 3)");
    }

    #[test]
    fn test_power_right_associative() {
        assert_eq!(shape("2^3^2"), "(2 ^ (3 ^ 2))");
        assert_eq!(shape("2^3*4"), "((2 ^ 3) * 4)");
    }

    #[test]
    fn test_layers() {
        assert_eq!(shape("(1+2)*3"), "(((1 + 2)) * 3)");
        assert_eq!(shape("((2))"), "((2))");
        assert_eq!(fails("(1+2"), CalcError::IncorrectParenthesesSequence);
        assert_eq!(fails("1+2)"), CalcError::IncorrectParenthesesSequence);
        assert_eq!(fails("(1+)2"), CalcError::IncorrectMethodSequence);
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(shape("2(3)"), "(2 * (3))");
        assert_eq!(shape("(2)(3)"), "((2) * (3))");
        assert_eq!(shape("(2)3"), "((2) * 3)");
        assert_eq!(shape("2s(3)"), "(2 * sin((3)))");
        assert_eq!(shape("s(1)c(2)"), "(sin((1)) * cos((2)))");
    }

    #[test]
    fn test_leading_sign() {
        assert_eq!(shape("-2"), "(0 - 2)");
        assert_eq!(shape("+2"), "(0 + 2)");
        assert_eq!(shape("(-2)^2"), "(((0 - 2)) ^ 2)");
    }

    #[test]
    fn test_sign_before_function_rejected() {
        assert_eq!(fails("-s(1)"), CalcError::IncorrectMethodSequence);
        assert_eq!(fails("-l10(100)"), CalcError::IncorrectMethodSequence);
        // parenthesized it is fine
        assert_eq!(shape("-(s(1))"), "(0 - (sin((1))))");
    }

    #[test]
    fn test_operator_sequences_rejected() {
        assert_eq!(fails("2++3"), CalcError::IncorrectMethodSequence);
        assert_eq!(fails("2+*3"), CalcError::IncorrectMethodSequence);
        assert_eq!(fails("*3"), CalcError::IncorrectMethodSequence);
        assert_eq!(fails("2+"), CalcError::IncorrectMethodSequence);
    }

    #[test]
    fn test_pending_names() {
        assert_eq!(shape("sh(1)"), "sinh((1))");
        assert_eq!(shape("as(1)"), "asin((1))");
        assert_eq!(shape("cth(1)"), "coth((1))");
        assert_eq!(fails("ash(1)"), CalcError::UnknownCharacter);
        assert_eq!(fails("h(1)"), CalcError::UnknownCharacter);
        assert_eq!(fails("s"), CalcError::IncorrectMethodSequence);
    }

    #[test]
    fn test_log_base_and_argument() {
        assert_eq!(shape("l(2)(8)"), "log((2))((8))");
        assert_eq!(shape("l10(100)"), "log(10)((100))");
        assert_eq!(shape("le(100)"), format!("log({})((100))", crate::value::euler()));
        assert_eq!(fails("l(8)"), CalcError::IncorrectMethodSequence);
    }

    #[test]
    fn test_factorial_binding() {
        assert_eq!(shape("3!"), "3!");
        assert_eq!(shape("3!!"), "3!!");
        assert_eq!(shape("1+3!"), "(1 + 3!)");
        assert_eq!(shape("2^3!"), "(2 ^ 3!)");
        assert_eq!(shape("(1+2)!"), "((1 + 2))!");
        assert_eq!(fails("!3"), CalcError::IncorrectMethodSequence);
        assert_eq!(fails("2+!"), CalcError::IncorrectMethodSequence);
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(fails(""), CalcError::EmptyInput);
        assert_eq!(fails("()"), CalcError::EmptyInput);
        assert_eq!(fails("2%3"), CalcError::UnknownCharacter);
    }
}
