//! # Error Types
//!
//! Failures of the parse pipeline. The `Display` output of
//! [`DocumentError`] is exactly the string placed into a validation report,
//! so callers never re-format it.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// 1-based position of the offending token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Error raised while turning text into a document tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// The text is not well-formed YAML.
    #[error("YAML parsing error: {message}{}", position_clause(.location))]
    Syntax {
        /// Parser message.
        message: String,
        /// Where the parser gave up, when it knows.
        location: Option<Location>,
    },

    /// The text parsed, but the result has no JSON representation
    /// (sequence or mapping keys, keys that collide once stringified).
    #[error("Unexpected error: {0}")]
    Unrepresentable(String),
}

impl DocumentError {
    /// The bare message without the report prefix or position clause.
    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { message, .. } => message,
            Self::Unrepresentable(message) => message,
        }
    }

    /// Position of a syntax error, if the parser reported one.
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::Syntax { location, .. } => *location,
            Self::Unrepresentable(_) => None,
        }
    }
}

impl From<serde_yaml::Error> for DocumentError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location().map(|loc| Location {
            line: loc.line(),
            column: loc.column(),
        });
        let text = err.to_string();
        let message = match location {
            Some(_) => strip_position(&text),
            None => text.as_str(),
        };
        Self::Syntax {
            message: message.to_string(),
            location,
        }
    }
}

/// Drop serde_yaml's own ` at line N column M` (and anything after it) so
/// the position is only reported once.
fn strip_position(message: &str) -> &str {
    [" at line ", " at position "]
        .iter()
        .filter_map(|marker| message.find(marker))
        .min()
        .map_or(message, |end| &message[..end])
}

fn position_clause(location: &Option<Location>) -> String {
    match location {
        Some(loc) => format!(" at {loc}"),
        None => String::new(),
    }
}
