//! Calculator core.
//!
//! This module provides functionality to:
//! - Accumulate typed input and committed operators
//! - Apply scientific functions to the current input
//! - Evaluate expressions with a restricted grammar
//! - Keep a memory register
//! - Map keypad buttons and keyboard keys to events

mod buttons;
mod controller;
mod detection;
mod evaluation;
mod expression;
mod functions;
mod input;
mod memory;
pub mod parser;

pub use buttons::Event;
pub use controller::Calculator;
pub use detection::looks_like_expression;
pub use evaluation::{
    ERROR_DISPLAY, Evaluation, evaluate_expression, format_result, rewrite_notation,
};
pub use expression::{ExpressionBuilder, Operator};
pub use functions::{AngleUnit, Applied, FunctionApplier, ScientificFunction};
pub use input::{DEFAULT_INPUT, InputAccumulator};
pub use memory::MemoryCell;
