//! Single-register calculator memory.

use super::evaluation::parse_operand;
use tracing::debug;

/// The `M` register. Untouched by clear and evaluate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryCell {
    value: f64,
}

impl MemoryCell {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    /// The stored value, unrounded, in the shortest form that reads back
    /// to the same number.
    pub fn recall(&self) -> String {
        self.value.to_string()
    }

    /// Add the numeric value of `input`. Non-numeric input leaves memory as is.
    pub fn add(&mut self, input: &str) {
        if let Some(x) = parse_operand(input) {
            self.value += x;
        } else {
            debug!(input, "ignoring non-numeric memory add");
        }
    }

    /// Subtract the numeric value of `input`. Non-numeric input leaves memory as is.
    pub fn subtract(&mut self, input: &str) {
        if let Some(x) = parse_operand(input) {
            self.value -= x;
        } else {
            debug!(input, "ignoring non-numeric memory subtract");
        }
    }

    /// `M: <value>` while memory holds something, otherwise empty.
    pub fn indicator(&self) -> String {
        if self.value == 0.0 {
            String::new()
        } else {
            format!("M: {}", self.recall())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_subtract_restores_value() {
        let mut memory = MemoryCell::default();
        memory.add("2.5");
        for input in ["0.1", "123.456", "-7", "1e3"] {
            let before = memory.value();
            memory.add(input);
            memory.subtract(input);
            assert!((memory.value() - before).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_numeric_input_is_ignored() {
        let mut memory = MemoryCell::default();
        memory.add("5");
        memory.add("Error");
        memory.subtract("pi");
        assert_eq!(memory.value(), 5.0);
    }

    #[test]
    fn test_recall_and_clear() {
        let mut memory = MemoryCell::default();
        assert_eq!(memory.recall(), "0");
        memory.add("4");
        memory.subtract("1.5");
        assert_eq!(memory.recall(), "2.5");
        memory.clear();
        assert_eq!(memory.value(), 0.0);
    }

    #[test]
    fn test_indicator() {
        let mut memory = MemoryCell::default();
        assert_eq!(memory.indicator(), "");
        memory.add("12");
        assert_eq!(memory.indicator(), "M: 12");
    }

    #[test]
    fn test_tiny_values_are_not_rounded_away() {
        let mut memory = MemoryCell::default();
        memory.add("1e-12");
        assert_eq!(memory.recall(), "0.000000000001");
        assert_eq!(memory.indicator(), "M: 0.000000000001");
        assert_eq!(parse_operand(&memory.recall()), Some(1e-12));
    }
}
