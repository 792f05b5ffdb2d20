//! Error types shared across the calculator core.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while applying a function or evaluating an expression.
///
/// Every variant is presented to the user the same way (the display shows
/// `"Error"`); the message is only used for logging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The expression does not match the accepted grammar.
    #[error("invalid syntax at position {position}: {message}")]
    Syntax { message: String, position: usize },

    /// An identifier that is neither a known function nor a constant.
    #[error("unknown name '{0}'")]
    UnknownName(String),

    /// Operand could not be parsed, or lies outside the function's domain.
    #[error("{function}: invalid operand '{operand}'")]
    DomainOrParse { function: String, operand: String },

    #[error("division by zero")]
    DivisionByZero,

    /// The computation overflowed or produced NaN.
    #[error("result is not a finite number")]
    NotFinite,
}

impl EvalError {
    pub(crate) fn syntax(message: impl Into<String>, position: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn domain(function: impl Into<String>, operand: impl Into<String>) -> Self {
        Self::DomainOrParse {
            function: function.into(),
            operand: operand.into(),
        }
    }
}

/// Failure while reading or writing the history file.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
