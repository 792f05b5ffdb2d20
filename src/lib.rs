//! A scientific calculator core: input buffers, a restricted expression
//! evaluator, scientific functions, memory and a persisted history.

pub mod calculator;
pub mod config;
pub mod error;
pub mod history;
pub mod repl;

pub use calculator::{AngleUnit, Calculator, Event};
pub use config::{Config, Theme};
pub use error::{ConfigError, EvalError, HistoryError};
pub use history::{HistoryEntry, HistoryLog, HistoryStore, JsonFileStore, MemoryStore};
