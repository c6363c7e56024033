//! Expression tree for the incremental parser
//!
//! A closed sum type with exclusively owned children: every rebalancing step
//! in the tree builder moves subtrees into newly built nodes, so no sharing
//! and no cycles can occur. The transient function-name state lives in the
//! parser, not here; by the time a tree reaches the evaluator every node is
//! one of these finished forms.

use std::fmt;

use crate::error::CalcError;
use crate::value::Decimal;

/// A node of the expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Placeholder: no operand yet
    Empty,
    /// Numeric leaf, possibly still under construction
    Number(NumberLit),
    /// Parenthesized subtree produced by the layer collector
    Group(Box<Node>),
    /// Operator with exclusively owned operands; unary functions carry a
    /// zero left operand, factorial carries a zero right operand
    Op {
        kind: OpKind,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Operator tags, one per supported operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    /// Postfix factorial; the argument is the left operand
    Fact,
    /// Logarithm; the base is the left operand
    Log,
    Sin,
    Cos,
    Tan,
    Cot,
    Asin,
    Acos,
    Atan,
    Acot,
    Sinh,
    Cosh,
    Tanh,
    Coth,
}

impl OpKind {
    /// Binding strength used by the push/fall rebalancing: a freshly
    /// appended operator falls into the right branch of any node that
    /// binds more loosely.
    pub fn precedence(self) -> u8 {
        match self {
            OpKind::Add | OpKind::Sub => 10,
            OpKind::Mul | OpKind::Div => 20,
            OpKind::Pow => 30,
            OpKind::Log
            | OpKind::Sin
            | OpKind::Cos
            | OpKind::Tan
            | OpKind::Cot
            | OpKind::Asin
            | OpKind::Acos
            | OpKind::Atan
            | OpKind::Acot
            | OpKind::Sinh
            | OpKind::Cosh
            | OpKind::Tanh
            | OpKind::Coth => 40,
            OpKind::Fact => 50,
        }
    }

    /// Prefix functions taking a single argument in the right operand
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            OpKind::Sin
                | OpKind::Cos
                | OpKind::Tan
                | OpKind::Cot
                | OpKind::Asin
                | OpKind::Acos
                | OpKind::Atan
                | OpKind::Acot
                | OpKind::Sinh
                | OpKind::Cosh
                | OpKind::Tanh
                | OpKind::Coth
        )
    }

    fn name(self) -> &'static str {
        match self {
            OpKind::Add => "+",
            OpKind::Sub => "-",
            OpKind::Mul => "*",
            OpKind::Div => "/",
            OpKind::Pow => "^",
            OpKind::Fact => "!",
            OpKind::Log => "log",
            OpKind::Sin => "sin",
            OpKind::Cos => "cos",
            OpKind::Tan => "tan",
            OpKind::Cot => "cot",
            OpKind::Asin => "asin",
            OpKind::Acos => "acos",
            OpKind::Atan => "atan",
            OpKind::Acot => "acot",
            OpKind::Sinh => "sinh",
            OpKind::Cosh => "cosh",
            OpKind::Tanh => "tanh",
            OpKind::Coth => "coth",
        }
    }
}

/// Numeric leaf under construction
///
/// `fraction` is the pending-fraction state: `None` while integer digits are
/// being appended, `Some(scale)` once a point has been seen, where `scale`
/// is the power of ten of the next fractional digit. Constants (e, pi) and
/// the synthetic zero of a leading sign are `closed` and cannot be extended.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    value: Decimal,
    fraction: Option<u32>,
    closed: bool,
    synthetic: bool,
}

impl NumberLit {
    /// Fresh open leaf, ready for digits
    pub(crate) fn open() -> Self {
        NumberLit {
            value: Decimal::zero(),
            fraction: None,
            closed: false,
            synthetic: false,
        }
    }

    /// Closed leaf holding a finished value (constants, unary-function left
    /// operands, the factorial dummy right operand)
    pub(crate) fn constant(value: Decimal) -> Self {
        NumberLit {
            value,
            fraction: None,
            closed: true,
            synthetic: false,
        }
    }

    /// The zero the builder inserts as the left operand of a leading sign
    pub(crate) fn sign_zero() -> Self {
        NumberLit {
            value: Decimal::zero(),
            fraction: None,
            closed: true,
            synthetic: true,
        }
    }

    pub(crate) fn push_digit(&mut self, d: u32) {
        match self.fraction {
            None => self.value.push_integer_digit(d),
            Some(scale) => {
                self.value.push_fraction_digit(d, scale);
                self.fraction = Some(scale + 1);
            }
        }
    }

    /// Switch to fractional mode; a second point in one leaf is an error
    pub(crate) fn push_point(&mut self) -> Result<(), CalcError> {
        if self.fraction.is_some() {
            return Err(CalcError::IncorrectPointPlacement);
        }
        self.fraction = Some(1);
        Ok(())
    }

    /// Whether digits may still be appended
    pub(crate) fn is_open(&self) -> bool {
        !self.closed
    }

    pub(crate) fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn value(&self) -> &Decimal {
        &self.value
    }
}

impl Node {
    /// Closed numeric leaf holding a finished value
    pub(crate) fn constant(value: Decimal) -> Node {
        Node::Number(NumberLit::constant(value))
    }

    pub(crate) fn group(inner: Node) -> Node {
        Node::Group(Box::new(inner))
    }

    pub(crate) fn binary(kind: OpKind, left: Node, right: Node) -> Node {
        Node::Op {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Prefix function node awaiting its argument; the zero left operand
    /// marks "no meaningful left operand"
    pub(crate) fn unary(kind: OpKind) -> Node {
        Node::binary(kind, Node::constant(Decimal::zero()), Node::Empty)
    }

    /// Logarithm node; both the base (left) and the argument (right) are
    /// still to be filled
    pub(crate) fn log() -> Node {
        Node::binary(OpKind::Log, Node::Empty, Node::Empty)
    }

    /// Postfix factorial wrapping a completed value
    pub(crate) fn factorial(arg: Node) -> Node {
        Node::binary(OpKind::Fact, arg, Node::constant(Decimal::zero()))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Empty => f.write_str("_"),
            Node::Number(lit) => write!(f, "{}", lit.value()),
            Node::Group(inner) => write!(f, "({})", inner),
            Node::Op { kind, left, right } => match kind {
                OpKind::Fact => write!(f, "{}!", left),
                OpKind::Log => write!(f, "log({})({})", left, right),
                k if k.is_unary() => write!(f, "{}({})", k.name(), right),
                k => write!(f, "({} {} {})", left, k.name(), right),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(OpKind::Mul.precedence() > OpKind::Add.precedence());
        assert!(OpKind::Pow.precedence() > OpKind::Mul.precedence());
        assert!(OpKind::Sin.precedence() > OpKind::Pow.precedence());
        assert!(OpKind::Fact.precedence() > OpKind::Sin.precedence());
        assert_eq!(OpKind::Add.precedence(), OpKind::Sub.precedence());
        assert_eq!(OpKind::Mul.precedence(), OpKind::Div.precedence());
    }

    #[test]
    fn test_point_placement() {
        let mut lit = NumberLit::open();
        lit.push_digit(1);
        assert!(lit.push_point().is_ok());
        lit.push_digit(5);
        assert_eq!(
            lit.push_point(),
            Err(CalcError::IncorrectPointPlacement),
            "second point in one literal must be rejected"
        );
        assert_eq!(lit.value().to_string(), "1.5");
    }

    #[test]
    fn test_unary_left_operand_is_zero() {
        let node = Node::unary(OpKind::Sin);
        match node {
            Node::Op { kind, left, right } => {
                assert_eq!(kind, OpKind::Sin);
                assert!(matches!(*left, Node::Number(ref l) if l.value().is_zero()));
                assert!(matches!(*right, Node::Empty));
            }
            _ => panic!("expected an operator node"),
        }
    }

    #[test]
    fn test_display_shapes() {
        let sum = Node::binary(OpKind::Add, Node::constant(crate::value::pi()), Node::Empty);
        assert!(sum.to_string().starts_with("(3.14"));
        assert!(sum.to_string().ends_with("+ _)"));
    }
}
