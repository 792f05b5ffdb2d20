//! Calculator state and the operations driven by UI events.

use super::buttons::Event;
use super::evaluation::{ERROR_DISPLAY, evaluate_expression};
use super::expression::{ExpressionBuilder, Operator};
use super::functions::{AngleUnit, FunctionApplier, ScientificFunction};
use super::input::InputAccumulator;
use super::memory::MemoryCell;
use crate::config::Theme;
use crate::error::EvalError;
use crate::history::{HistoryEntry, HistoryLog};
use tracing::debug;

/// All state of one calculator: both expression buffers, memory, history and
/// mode flags.
#[derive(Debug)]
pub struct Calculator {
    input: InputAccumulator,
    expression: ExpressionBuilder,
    /// Label of the last applied function, shown until the next edit.
    annotation: Option<String>,
    memory: MemoryCell,
    history: HistoryLog,
    angle_unit: AngleUnit,
    theme: Theme,
}

impl Calculator {
    pub fn new(history: HistoryLog) -> Self {
        Self {
            input: InputAccumulator::new(),
            expression: ExpressionBuilder::new(),
            annotation: None,
            memory: MemoryCell::default(),
            history,
            angle_unit: AngleUnit::default(),
            theme: Theme::default(),
        }
    }

    pub fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Dispatch a UI event.
    ///
    /// An `Err` has already been reflected on the display as `"Error"`; it is
    /// returned only so callers can log it.
    pub fn handle(&mut self, event: Event) -> Result<(), EvalError> {
        match event {
            Event::Append(text) => self.append(&text),
            Event::Operator(op) => self.commit_operator(op),
            Event::Evaluate => return self.evaluate().map(|_| ()),
            Event::Clear => self.clear(),
            Event::ClearAll => self.clear_all(),
            Event::Backspace => self.backspace(),
            Event::Function(function) => return self.apply_function(function),
            Event::MemoryClear => self.memory_clear(),
            Event::MemoryRecall => self.memory_recall(),
            Event::MemoryAdd => self.memory_add(),
            Event::MemorySubtract => self.memory_subtract(),
            Event::SetAngleUnit(unit) => self.set_angle_unit(unit),
            Event::SetTheme(theme) => self.set_theme(theme),
        }
        Ok(())
    }

    pub fn append(&mut self, text: &str) {
        self.annotation = None;
        self.input.append(text);
    }

    pub fn commit_operator(&mut self, op: Operator) {
        self.annotation = None;
        self.expression.commit_operator(&mut self.input, op);
    }

    /// Evaluate the committed expression followed by the current input.
    ///
    /// On success the result replaces the input, the expression is cleared and
    /// the calculation is recorded. On failure the input shows `"Error"` and
    /// the expression is kept so the user can correct it.
    pub fn evaluate(&mut self) -> Result<HistoryEntry, EvalError> {
        self.annotation = None;
        match evaluate_expression(self.expression.text(), self.input.value()) {
            Ok(evaluation) => {
                self.input.set(evaluation.display);
                self.expression.reset();
                self.history.append(evaluation.entry.clone());
                Ok(evaluation.entry)
            }
            Err(error) => {
                self.input.set(ERROR_DISPLAY);
                Err(error)
            }
        }
    }

    pub fn apply_function(&mut self, function: ScientificFunction) -> Result<(), EvalError> {
        let applier = FunctionApplier::new(self.angle_unit);
        match applier.apply(function, self.input.value()) {
            Ok(applied) => {
                self.input.set(applied.value);
                self.annotation = applied.annotation;
                Ok(())
            }
            Err(error) => {
                debug!(%function, %error, "function failed");
                self.input.set(ERROR_DISPLAY);
                self.annotation = None;
                Err(error)
            }
        }
    }

    /// `C`: reset the current input only.
    pub fn clear(&mut self) {
        self.annotation = None;
        self.input.clear();
    }

    /// `AC`: reset the current input and the committed expression.
    pub fn clear_all(&mut self) {
        self.clear();
        self.expression.reset();
    }

    pub fn backspace(&mut self) {
        self.input.backspace();
    }

    pub fn memory_clear(&mut self) {
        self.memory.clear();
    }

    pub fn memory_recall(&mut self) {
        self.input.set(self.memory.recall());
    }

    pub fn memory_add(&mut self) {
        self.memory.add(self.input.value());
    }

    pub fn memory_subtract(&mut self) {
        self.memory.subtract(self.input.value());
    }

    pub fn set_angle_unit(&mut self, angle_unit: AngleUnit) {
        debug!(?angle_unit, "angle unit changed");
        self.angle_unit = angle_unit;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Main display: the current input.
    pub fn display(&self) -> &str {
        self.input.value()
    }

    /// Secondary display: the last function annotation, or the committed
    /// expression.
    pub fn pending_display(&self) -> &str {
        self.annotation
            .as_deref()
            .unwrap_or_else(|| self.expression.text())
    }

    pub fn expression(&self) -> &str {
        self.expression.text()
    }

    pub fn memory_indicator(&self) -> String {
        self.memory.indicator()
    }

    pub fn memory(&self) -> f64 {
        self.memory.value()
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }
}
