//! The value currently being typed.

/// Default contents of the input buffer.
pub const DEFAULT_INPUT: &str = "0";

/// Buffer for the operand being composed, or the last computed result.
///
/// Never empty. Token legality is not checked here; malformed text is caught
/// when the expression is evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputAccumulator {
    value: String,
}

impl Default for InputAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputAccumulator {
    pub fn new() -> Self {
        Self {
            value: DEFAULT_INPUT.to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Append `token`, replacing the default `"0"` unless `token` is `"."`.
    pub fn append(&mut self, token: &str) {
        if self.value == DEFAULT_INPUT && token != "." {
            self.value = token.to_string();
        } else {
            self.value.push_str(token);
        }
    }

    /// Drop the last character, falling back to `"0"`.
    pub fn backspace(&mut self) {
        self.value.pop();
        if self.value.is_empty() {
            self.clear();
        }
    }

    /// Toggle a leading minus sign.
    pub fn negate(&mut self) {
        self.value = toggle_sign(&self.value);
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if self.value.is_empty() {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.value = DEFAULT_INPUT.to_string();
    }
}

pub(crate) fn toggle_sign(value: &str) -> String {
    match value.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{value}"),
    }
}
