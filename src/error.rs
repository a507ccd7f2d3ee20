// File: ./src/error.rs
//! Error taxonomy for meeting command parsing.
use thiserror::Error;

/// Why a command could not be turned into a [`MeetingIntent`](crate::model::MeetingIntent).
///
/// Parsing is all-or-nothing: any of these aborts the call and no partial
/// intent is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input does not match any grammar alternative. `offset` is the
    /// character offset of the furthest position any alternative reached.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// A parsed numeric component is outside its valid bound.
    #[error("{0}")]
    Range(String),

    /// The caller supplied a zone name chrono-tz does not know.
    #[error("unknown time zone '{0}'")]
    UnknownTimeZone(String),
}

impl ParseError {
    pub fn range(message: impl Into<String>) -> Self {
        Self::Range(message.into())
    }

    /// Character offset of a syntax failure, `None` for the other kinds.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax { .. })
    }

    pub fn is_range(&self) -> bool {
        matches!(self, ParseError::Range(_))
    }
}
