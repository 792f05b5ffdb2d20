//! Expression evaluation.
//!
//! Turns the committed expression plus the current input into a displayable
//! result and the history entry that records it.

use super::parser;
use crate::error::EvalError;
use crate::history::HistoryEntry;
use tracing::debug;

/// What the display shows after any failed operation.
pub const ERROR_DISPLAY: &str = "Error";

/// Calculator notation and its evaluable spelling.
///
/// Replacements never overlap, so the order of application does not matter.
const NOTATION: &[(&str, &str)] = &[("^", "**"), ("π", "pi"), ("√", "sqrt")];

/// Outcome of a successful evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// The numeric value.
    pub value: f64,
    /// The value formatted for the display.
    pub display: String,
    /// Record for the history log.
    pub entry: HistoryEntry,
}

/// Rewrite calculator notation into the parser's notation.
pub fn rewrite_notation(raw: &str) -> String {
    NOTATION
        .iter()
        .fold(raw.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Evaluate `total_expression` followed by `current_input`.
///
/// A string holding exactly one `%` between two plain numbers is read as
/// "value percent of percent" and never reaches the general grammar. Any other
/// `%` is left for the parser, which rejects it.
pub fn evaluate_expression(
    total_expression: &str,
    current_input: &str,
) -> Result<Evaluation, EvalError> {
    let raw = format!("{total_expression}{current_input}");
    let rewritten = rewrite_notation(&raw);

    if let Some((value, percent)) = split_percentage(&rewritten) {
        let result = value * percent / 100.0;
        let label = format!(
            "{}% of {}",
            format_float_literal(value),
            format_float_literal(percent)
        );
        debug!(%label, result, "evaluated percentage");
        return Ok(Evaluation::new(label, result));
    }

    match parser::evaluate(&rewritten) {
        Ok(value) => {
            debug!(expression = %raw, value, "evaluated");
            Ok(Evaluation::new(raw, value))
        }
        Err(error) => {
            debug!(expression = %raw, %error, "evaluation failed");
            Err(error)
        }
    }
}

impl Evaluation {
    fn new(expression: String, value: f64) -> Self {
        let display = format_result(value);
        Self {
            value,
            entry: HistoryEntry::new(expression, display.clone()),
            display,
        }
    }
}

fn split_percentage(expression: &str) -> Option<(f64, f64)> {
    let (value, percent) = expression.split_once('%')?;
    if percent.contains('%') {
        return None;
    }
    Some((parse_operand(value)?, parse_operand(percent)?))
}

/// Parse a display string as a finite number.
pub(crate) fn parse_operand(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a result for the display.
///
/// Integer-valued results drop the fractional part entirely; anything else is
/// rounded to ten decimal places with trailing zeros removed.
pub fn format_result(value: f64) -> String {
    let formatted = if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let formatted = format!("{:.10}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    };

    // Negative values that round to zero.
    if formatted == "-0" {
        "0".to_string()
    } else {
        formatted
    }
}

/// Format a number the way a float literal is written: `3` becomes `3.0`.
pub(crate) fn format_float_literal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
