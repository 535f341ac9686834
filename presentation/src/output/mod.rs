//! Console output formatting

pub mod console;

pub use console::{ConsoleFormatter, MASK};
