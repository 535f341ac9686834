//! Terminal prompts for missing configuration values.

pub mod terminal;

pub use terminal::{TerminalPrompt, TypeAhead};
