//! Presentation layer for confkeep
//!
//! This crate contains CLI definitions, output formatters and the
//! interactive terminal prompt.

pub mod cli;
pub mod output;
pub mod prompt;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use prompt::terminal::TerminalPrompt;
