//! Interactive prompt on the terminal.
//!
//! Implements [`PromptPort`] for the CLI. Questions are written to stderr so
//! that a resolved value printed on stdout can be captured by scripts.
//!
//! # User Interface
//!
//! ```text
//! Tracker username: alice
//! API token: ********
//! Would you like to save this value in /home/u/.config/confkeep/confkeep.cfg?
//! nr = no, and remember choice
//! [Y/n/nr]
//! ```
//!
//! | Answer | Meaning |
//! |--------|---------|
//! | `y`, empty | Save the value |
//! | `n` | Use the value once |
//! | `nr` | Use the value once and never offer to save it again |
//!
//! Secrets are read in raw mode without echo. An answer that was typed ahead
//! and already sits in the input buffer is consumed from there instead, so
//! piped or pre-typed answers keep their order.

use colored::Colorize;
use confkeep_application::{PersistChoice, PromptError, PromptPort};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, BufReader, Cursor, IsTerminal, Read, Stderr, Stdin, Write};
use std::path::Path;

/// Line input that can tell whether answers are already buffered.
pub trait TypeAhead: BufRead {
    /// Whether bytes were read ahead and are waiting to be consumed
    fn has_type_ahead(&self) -> bool;
}

impl<R: Read> TypeAhead for BufReader<R> {
    fn has_type_ahead(&self) -> bool {
        !self.buffer().is_empty()
    }
}

impl<T: AsRef<[u8]>> TypeAhead for Cursor<T> {
    fn has_type_ahead(&self) -> bool {
        (self.position() as usize) < self.get_ref().as_ref().len()
    }
}

/// Prompt reading answers from `R` and writing questions to `W`.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
    /// Read secrets from the terminal in raw mode instead of from `input`
    raw_secrets: bool,
}

impl TerminalPrompt<BufReader<Stdin>, Stderr> {
    /// Prompt on the process' stdin/stderr.
    ///
    /// Secrets are read without echo when stdin is a terminal; piped input
    /// is read line by line.
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let raw_secrets = stdin.is_terminal();
        Self {
            input: BufReader::new(stdin),
            output: io::stderr(),
            raw_secrets,
        }
    }
}

impl<R: TypeAhead, W: Write> TerminalPrompt<R, W> {
    /// Prompt on arbitrary streams. Secrets are read from `input` as lines.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            raw_secrets: false,
        }
    }

    /// Consume the prompt, returning the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, question: &str) -> Result<(), PromptError> {
        write!(self.output, "{}", question).map_err(io_error)?;
        self.output.flush().map_err(io_error)
    }

    /// Read one line, without its line ending. End of input cancels.
    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(PromptError::Cancelled);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn read_secret(&mut self) -> Result<String, PromptError> {
        if !self.raw_secrets || self.input.has_type_ahead() {
            return self.read_line();
        }

        enable_raw_mode().map_err(io_error)?;
        let result = read_masked_line();
        let restored = disable_raw_mode().map_err(io_error);
        writeln!(self.output).map_err(io_error)?;
        let value = result?;
        restored?;
        Ok(value)
    }
}

impl<R: TypeAhead, W: Write> PromptPort for TerminalPrompt<R, W> {
    fn prompt(&mut self, text: &str) -> Result<String, PromptError> {
        self.ask(&format!("{}: ", text.bold()))?;
        self.read_line()
    }

    fn prompt_secret(&mut self, text: &str) -> Result<String, PromptError> {
        self.ask(&format!("{}: ", text.bold()))?;
        self.read_secret()
    }

    fn confirm_persist(&mut self, location: &Path) -> Result<PersistChoice, PromptError> {
        loop {
            self.ask(&format!(
                "Would you like to save this value in {}?\n{}\n{} ",
                location.display().to_string().cyan(),
                "nr = no, and remember choice".dimmed(),
                "[Y/n/nr]".bold()
            ))?;
            let answer = self.read_line()?;
            match PersistChoice::parse(&answer) {
                Some(choice) => return Ok(choice),
                None => {
                    writeln!(self.output, "{}", "Please answer y, n or nr.".yellow())
                        .map_err(io_error)?;
                }
            }
        }
    }
}

/// Read keys in raw mode until Enter, echoing nothing.
fn read_masked_line() -> Result<String, PromptError> {
    let mut value = String::new();
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read().map_err(io_error)?
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }

        match code {
            KeyCode::Enter => return Ok(value),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(PromptError::Cancelled);
            }
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                if value.is_empty() {
                    return Err(PromptError::Cancelled);
                }
            }
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(c) => value.push(c),
            _ => {}
        }
    }
}

fn io_error(e: io::Error) -> PromptError {
    match e.kind() {
        io::ErrorKind::Interrupted => PromptError::Cancelled,
        _ => PromptError::Io(e.to_string()),
    }
}
