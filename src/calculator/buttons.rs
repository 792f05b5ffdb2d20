//! Keypad labels and keyboard keys, mapped to calculator events.

use super::expression::Operator;
use super::functions::{AngleUnit, ScientificFunction};
use crate::config::Theme;

/// A discrete UI event, each handled by one calculator operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Append raw text to the current input (digits, `.`, typed operators).
    Append(String),
    /// Commit the current input followed by an operator.
    Operator(Operator),
    Evaluate,
    /// Clear the current input only.
    Clear,
    /// Clear the current input and the committed expression.
    ClearAll,
    Backspace,
    Function(ScientificFunction),
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
    SetAngleUnit(AngleUnit),
    SetTheme(Theme),
}

impl Event {
    /// The event for a keypad button, by its label.
    ///
    /// Besides the glyphs printed on the keypad, plain ASCII spellings are
    /// accepted so every button can be pressed from a terminal.
    pub fn from_label(label: &str) -> Option<Self> {
        use ScientificFunction as F;

        if let Some(op) = Operator::from_symbol(label) {
            return Some(Self::Operator(op));
        }

        let event = match label {
            "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" | "." => {
                Self::Append(label.to_string())
            }
            "=" => Self::Evaluate,
            "C" => Self::Clear,
            "AC" => Self::ClearAll,
            "⌫" | "bs" => Self::Backspace,
            "±" | "neg" => Self::Function(F::Negate),
            "√" | "sqrt" => Self::Function(F::Sqrt),
            "x²" | "sq" => Self::Function(F::Square),
            "π" | "pi" => Self::Function(F::Pi),
            "e" => Self::Function(F::E),
            "sin" => Self::Function(F::Sin),
            "cos" => Self::Function(F::Cos),
            "tan" => Self::Function(F::Tan),
            "asin" => Self::Function(F::Asin),
            "acos" => Self::Function(F::Acos),
            "atan" => Self::Function(F::Atan),
            "log" => Self::Function(F::Log),
            "ln" => Self::Function(F::Ln),
            "MC" => Self::MemoryClear,
            "MR" => Self::MemoryRecall,
            "M+" => Self::MemoryAdd,
            "M-" => Self::MemorySubtract,
            "RAD" => Self::SetAngleUnit(AngleUnit::Radians),
            "DEG" => Self::SetAngleUnit(AngleUnit::Degrees),
            "dark" => Self::SetTheme(Theme::Dark),
            "light" => Self::SetTheme(Theme::Light),
            "blue" => Self::SetTheme(Theme::Blue),
            _ => return None,
        };
        Some(event)
    }

    /// The event for a keyboard key.
    ///
    /// Typed operators are appended to the current input as text rather than
    /// committed, so a whole expression can be typed and then evaluated.
    pub fn from_key(key: char) -> Option<Self> {
        let event = match key {
            '0'..='9' | '.' | '+' | '-' | '*' | '/' | '^' | '%' | '(' | ')' => {
                Self::Append(key.to_string())
            }
            'p' => Self::Append("pi".to_string()),
            'e' => Self::Append("e".to_string()),
            '\n' | '\r' => Self::Evaluate,
            '\u{1b}' => Self::ClearAll,
            '\u{8}' | '\u{7f}' => Self::Backspace,
            _ => return None,
        };
        Some(event)
    }
}
