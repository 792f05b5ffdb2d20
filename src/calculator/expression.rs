//! The committed part of the expression.

use super::input::InputAccumulator;
use std::fmt;

/// A binary operator or parenthesis committed from the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Percent,
    OpenParen,
    CloseParen,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Percent,
        Self::OpenParen,
        Self::CloseParen,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
            Self::Percent => "%",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Text of operands and operators already committed, awaiting evaluation.
///
/// Nothing is parsed here: operators are concatenated verbatim and the
/// evaluator decides later whether the result is well formed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionBuilder {
    text: String,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `true` when no binary operation is pending.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Move the current input and `op` into the expression and reset the input.
    pub fn commit_operator(&mut self, input: &mut InputAccumulator, op: Operator) {
        self.text.push_str(input.value());
        self.text.push_str(op.symbol());
        input.clear();
    }

    pub fn reset(&mut self) {
        self.text.clear();
    }
}
