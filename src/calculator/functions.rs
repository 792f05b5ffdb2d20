//! Scientific functions applied directly to the current input.

use super::evaluation::{format_float_literal, format_result, parse_operand};
use super::input::toggle_sign;
use crate::error::EvalError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit used to interpret trigonometric arguments and results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    /// Short mode indicator shown on the display.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Radians => "RAD",
            Self::Degrees => "DEG",
        }
    }
}

/// A function button on the scientific keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScientificFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Sqrt,
    Square,
    Negate,
    Pi,
    E,
}

impl ScientificFunction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Negate => "negate",
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    fn is_inverse_trig(self) -> bool {
        matches!(self, Self::Asin | Self::Acos | Self::Atan)
    }

    fn is_forward_trig(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }
}

impl fmt::Display for ScientificFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// New input value produced by a function, with its display annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub value: String,
    /// Label such as `sin(90)`; never part of the committed expression.
    pub annotation: Option<String>,
}

impl Applied {
    fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            annotation: None,
        }
    }

    fn annotated(value: f64, annotation: String) -> Self {
        Self {
            value: format_result(value),
            annotation: Some(annotation),
        }
    }
}

/// Applies [`ScientificFunction`]s under a given [`AngleUnit`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FunctionApplier {
    angle_unit: AngleUnit,
}

impl FunctionApplier {
    pub fn new(angle_unit: AngleUnit) -> Self {
        Self { angle_unit }
    }

    pub fn apply(&self, function: ScientificFunction, input: &str) -> Result<Applied, EvalError> {
        use ScientificFunction as F;

        match function {
            F::Pi => return Ok(Applied::plain("pi")),
            F::E => return Ok(Applied::plain("e")),
            F::Negate => return Ok(Applied::plain(toggle_sign(input))),
            _ => {}
        }

        let domain_error = || EvalError::domain(function.name(), input);
        let x = parse_operand(input).ok_or_else(domain_error)?;

        let (result, annotation) = match function {
            F::Sqrt if x < 0.0 => return Err(domain_error()),
            F::Sqrt => (x.sqrt(), format!("√({})", format_float_literal(x))),
            F::Square => (x * x, format!("({})²", format_float_literal(x))),
            F::Log | F::Ln if x <= 0.0 => return Err(domain_error()),
            F::Asin | F::Acos if !(-1.0..=1.0).contains(&x) => return Err(domain_error()),
            F::Log => (x.log10(), format!("{function}({input})")),
            F::Ln => (x.ln(), format!("{function}({input})")),
            _ => (self.trig(function, x), format!("{function}({input})")),
        };

        if !result.is_finite() {
            return Err(EvalError::NotFinite);
        }
        Ok(Applied::annotated(result, annotation))
    }

    fn trig(&self, function: ScientificFunction, x: f64) -> f64 {
        use ScientificFunction as F;

        let degrees = self.angle_unit == AngleUnit::Degrees;
        let x = if degrees && function.is_forward_trig() {
            x.to_radians()
        } else {
            x
        };

        let result = match function {
            F::Sin => x.sin(),
            F::Cos => x.cos(),
            F::Tan => x.tan(),
            F::Asin => x.asin(),
            F::Acos => x.acos(),
            F::Atan => x.atan(),
            _ => f64::NAN,
        };

        if degrees && function.is_inverse_trig() {
            result.to_degrees()
        } else {
            result
        }
    }
}
