//! Error types

use thiserror::Error;

/// Errors raised while building a [`Document`](crate::Document).
///
/// Only a section header that never closes is fatal. Every other irregular
/// line is absorbed by the classifier as inert content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line opens a `[` section header with no closing `]` on the same line
    #[error("malformed section header at line {line_number}: '{line}'")]
    MalformedSectionHeader {
        /// 1-based line number in the input
        line_number: usize,
        /// The offending line, as read
        line: String,
    },
}

/// Per-line failure reported by [`classify`](crate::line::classify).
///
/// The classifier has no notion of position; the decoder lifts this into
/// [`ParseError::MalformedSectionHeader`] with the line number attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated section header: '{0}'")]
pub struct UnterminatedHeader(pub String);

impl UnterminatedHeader {
    /// Attach the 1-based line number the header was found on
    pub fn at_line(self, line_number: usize) -> ParseError {
        ParseError::MalformedSectionHeader {
            line_number,
            line: self.0,
        }
    }
}
