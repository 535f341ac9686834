//! Section-delimited key/value text format
//!
//! ```text
//! # comment
//! [General]
//! version = 1
//! token
//!
//! [Tracker]
//! username: alice
//! motd = first line
//!     second line
//! ```
//!
//! - `[name]` starts a section
//! - `key = value` or `key: value` sets an option (split at the first
//!   delimiter)
//! - a bare `key` is the confidential sentinel
//! - indented lines continue the previous value
//! - `#` and `;` start full-line comments
//! - a value wrapped in double quotes is taken literally, with `\\`, `\"`,
//!   `\n`, `\r` and `\t` escapes
//!
//! Keys are case-insensitive and stored lower-cased. Whitespace around keys
//! and unquoted values is not significant. Values that would not survive the
//! unquoted form (edge whitespace, blank or comment-like continuation lines)
//! are written quoted.

use confkeep_domain::{ConfigDocument, StoredValue};
use thiserror::Error;

/// A syntax error, with the 1-based line it was found on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct IniParseError {
    pub line: usize,
    pub message: String,
}

impl IniParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Parse text into a document.
pub fn parse(text: &str) -> Result<ConfigDocument, IniParseError> {
    let mut doc = ConfigDocument::new();
    let mut section: Option<String> = None;
    // Option that an indented line would continue
    let mut last_key: Option<String> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            last_key = None;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indented = raw.starts_with([' ', '\t']);
        if indented && let (Some(sec), Some(key)) = (&section, &last_key) {
            let current = doc
                .section(sec)
                .and_then(|s| s.get(key))
                .and_then(StoredValue::as_value)
                .ok_or_else(|| {
                    IniParseError::new(line_no, format!("'{key}' has no value to continue"))
                })?;
            let joined = format!("{current}\n{trimmed}");
            doc.set(sec, key, StoredValue::Value(joined))
                .map_err(|e| IniParseError::new(line_no, e.to_string()))?;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| IniParseError::new(line_no, "section header is missing ']'"))?;
            doc.ensure_section(name)
                .map_err(|e| IniParseError::new(line_no, e.to_string()))?;
            section = Some(name.to_string());
            last_key = None;
            continue;
        }

        let Some(sec) = &section else {
            return Err(IniParseError::new(
                line_no,
                "option appears before any section header",
            ));
        };

        let (key, value) = match trimmed.find(['=', ':']) {
            Some(at) => {
                let value = decode_value(trimmed[at + 1..].trim())
                    .map_err(|message| IniParseError::new(line_no, message))?;
                (trimmed[..at].trim(), StoredValue::Value(value))
            }
            None => (trimmed, StoredValue::Confidential),
        };
        doc.set(sec, key, value)
            .map_err(|e| IniParseError::new(line_no, e.to_string()))?;
        last_key = Some(key.to_string());
    }

    Ok(doc)
}

/// Render a document as text.
///
/// Sections and options are written in document order, each section
/// followed by a blank line.
pub fn render(doc: &ConfigDocument) -> String {
    let mut out = String::new();
    for section in doc.sections() {
        out.push('[');
        out.push_str(section.name());
        out.push_str("]\n");
        for (key, value) in section.entries() {
            match value {
                StoredValue::Value(v) if needs_quoting(v) => {
                    out.push_str(key);
                    out.push_str(" = ");
                    out.push_str(&quote(v));
                    out.push('\n');
                }
                StoredValue::Value(v) => {
                    let mut lines = v.split('\n');
                    out.push_str(key);
                    out.push_str(" = ");
                    out.push_str(lines.next().unwrap_or_default());
                    out.push('\n');
                    for line in lines {
                        out.push('\t');
                        out.push_str(line);
                        out.push('\n');
                    }
                }
                StoredValue::Confidential => {
                    out.push_str(key);
                    out.push('\n');
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Whether `value` would change when written unquoted and parsed back
fn needs_quoting(value: &str) -> bool {
    value.starts_with('"')
        || value.contains('\r')
        || value.split('\n').enumerate().any(|(i, line)| {
            line.trim() != line || (i > 0 && (line.is_empty() || line.starts_with(['#', ';'])))
        })
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Unquote a value if it is wrapped in double quotes.
fn decode_value(raw: &str) -> Result<String, String> {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return Ok(raw.to_string());
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => return Err(format!("unknown escape '\\{other}' in quoted value")),
            None => return Err("quoted value ends with a lone '\\'".to_string()),
        }
    }
    Ok(out)
}
