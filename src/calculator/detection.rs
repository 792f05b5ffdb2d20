//! Expression detection for typed input.
//!
//! Decides whether a line of text can be typed on the keyboard as a whole
//! expression, as opposed to naming a keypad button.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters and words the keyboard can produce: digits, operators,
    /// parentheses, the decimal point and the constants `pi` and `e`.
    static ref KEYBOARD_EXPRESSION: Regex = Regex::new(
        r"^(?:[\d\s.+\-*/%^()]|pi|e)+$"
    ).unwrap();

    /// Something to compute with: a digit or a constant.
    static ref HAS_OPERAND: Regex = Regex::new(
        r"\d|pi|e"
    ).unwrap();
}

/// Check if input can be typed as an expression.
///
/// Returns `true` if the input:
/// 1. Contains only keys the keyboard maps to input
/// 2. Contains at least one number or constant
pub fn looks_like_expression(input: &str) -> bool {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return false;
    }

    KEYBOARD_EXPRESSION.is_match(trimmed) && HAS_OPERAND.is_match(trimmed)
}
