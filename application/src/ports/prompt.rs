//! Interactive prompt port.
//!
//! The resolver obtains missing values from the user through this port. All
//! calls are synchronous and block until the user answers; there is no
//! timeout.
//!
//! # Architecture
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`PromptPort`] - defined here in application layer
//! - **Adapter**: `TerminalPrompt` - implemented in presentation layer
//!
//! # Built-in Implementations
//!
//! - [`NonInteractivePrompt`] - refuses every prompt (`--no-input`)
//! - [`ScriptedPrompt`] - answers from a fixed script and records each call

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for prompt operations.
///
/// These errors represent failures while asking, not the user's answers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// User cancelled the prompt (e.g., via Ctrl+C or end of input).
    #[error("Prompt cancelled")]
    Cancelled,

    /// Interactive input is disabled for this process.
    #[error("Interactive input is disabled; cannot ask for {0:?}")]
    NotInteractive(String),

    /// Terminal read/write failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// An answer could not be understood.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A scripted responder ran out of answers.
    #[error("No scripted answer left for {0:?}")]
    Exhausted(String),
}

/// Answer to the "save this value?" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistChoice {
    /// Write the value to the store (`y`, or empty input)
    Save,
    /// Return the value without writing it (`n`)
    Skip,
    /// Do not write it, and remember to never offer again (`nr`)
    SkipAndRemember,
}

impl PersistChoice {
    /// Parse a confirmation answer, case-insensitively.
    ///
    /// Empty input means [`PersistChoice::Save`]. Returns `None` for
    /// anything else that is not `y`, `n` or `nr`.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "" | "y" => Some(PersistChoice::Save),
            "n" => Some(PersistChoice::Skip),
            "nr" => Some(PersistChoice::SkipAndRemember),
            _ => None,
        }
    }
}

/// Port for asking the user for configuration values.
pub trait PromptPort {
    /// Ask for a value with echoed input.
    fn prompt(&mut self, text: &str) -> Result<String, PromptError>;

    /// Ask for a value without echoing it.
    fn prompt_secret(&mut self, text: &str) -> Result<String, PromptError>;

    /// Ask whether a freshly entered value should be written to `location`.
    fn confirm_persist(&mut self, location: &Path) -> Result<PersistChoice, PromptError>;
}

/// Prompt used when interactive input is disabled.
///
/// Every call fails with [`PromptError::NotInteractive`], so a missing value
/// surfaces as an error instead of blocking on a terminal nobody watches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractivePrompt;

impl PromptPort for NonInteractivePrompt {
    fn prompt(&mut self, text: &str) -> Result<String, PromptError> {
        Err(PromptError::NotInteractive(text.to_string()))
    }

    fn prompt_secret(&mut self, text: &str) -> Result<String, PromptError> {
        Err(PromptError::NotInteractive(text.to_string()))
    }

    fn confirm_persist(&mut self, location: &Path) -> Result<PersistChoice, PromptError> {
        Err(PromptError::NotInteractive(format!(
            "save to {}",
            location.display()
        )))
    }
}

/// A prompt call recorded by [`ScriptedPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCall {
    Plain(String),
    Secret(String),
    Confirm(PathBuf),
}

/// Prompt that replays a fixed list of answers.
///
/// Answers are consumed in order regardless of the kind of question. Each
/// call is recorded so tests can assert what was asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    calls: Vec<PromptCall>,
}

impl ScriptedPrompt {
    pub fn new<I, A>(answers: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            calls: Vec::new(),
        }
    }

    /// All calls made so far
    pub fn calls(&self) -> &[PromptCall] {
        &self.calls
    }

    /// Number of answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, question: &str) -> Result<String, PromptError> {
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::Exhausted(question.to_string()))
    }
}

impl PromptPort for ScriptedPrompt {
    fn prompt(&mut self, text: &str) -> Result<String, PromptError> {
        self.calls.push(PromptCall::Plain(text.to_string()));
        self.next_answer(text)
    }

    fn prompt_secret(&mut self, text: &str) -> Result<String, PromptError> {
        self.calls.push(PromptCall::Secret(text.to_string()));
        self.next_answer(text)
    }

    fn confirm_persist(&mut self, location: &Path) -> Result<PersistChoice, PromptError> {
        self.calls.push(PromptCall::Confirm(location.to_path_buf()));
        let answer = self.next_answer("save confirmation")?;
        PersistChoice::parse(&answer).ok_or(PromptError::InvalidInput(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_choice_parse() {
        assert_eq!(PersistChoice::parse(""), Some(PersistChoice::Save));
        assert_eq!(PersistChoice::parse("  "), Some(PersistChoice::Save));
        assert_eq!(PersistChoice::parse("Y"), Some(PersistChoice::Save));
        assert_eq!(PersistChoice::parse("n"), Some(PersistChoice::Skip));
        assert_eq!(PersistChoice::parse("NR"), Some(PersistChoice::SkipAndRemember));
        assert_eq!(PersistChoice::parse("nR\n"), Some(PersistChoice::SkipAndRemember));
        assert_eq!(PersistChoice::parse("maybe"), None);
    }

    #[test]
    fn test_non_interactive_refuses() {
        let mut prompt = NonInteractivePrompt;
        assert!(matches!(
            prompt.prompt("Username"),
            Err(PromptError::NotInteractive(_))
        ));
        assert!(prompt.prompt_secret("Password").is_err());
        assert!(prompt.confirm_persist(Path::new("x.cfg")).is_err());
    }

    #[test]
    fn test_scripted_prompt_records_calls() {
        let mut prompt = ScriptedPrompt::new(["alice", "s3cret", "nr"]);
        assert_eq!(prompt.prompt("Username").unwrap(), "alice");
        assert_eq!(prompt.prompt_secret("Password").unwrap(), "s3cret");
        assert_eq!(
            prompt.confirm_persist(Path::new("x.cfg")).unwrap(),
            PersistChoice::SkipAndRemember
        );

        assert_eq!(
            prompt.calls(),
            &[
                PromptCall::Plain("Username".into()),
                PromptCall::Secret("Password".into()),
                PromptCall::Confirm(PathBuf::from("x.cfg")),
            ]
        );
        assert_eq!(prompt.remaining(), 0);
    }

    #[test]
    fn test_scripted_prompt_exhausted() {
        let mut prompt = ScriptedPrompt::default();
        assert_eq!(
            prompt.prompt("Username"),
            Err(PromptError::Exhausted("Username".into()))
        );
    }

    #[test]
    fn test_scripted_confirm_rejects_unknown_answer() {
        let mut prompt = ScriptedPrompt::new(["perhaps"]);
        assert_eq!(
            prompt.confirm_persist(Path::new("x.cfg")),
            Err(PromptError::InvalidInput("perhaps".into()))
        );
    }
}
