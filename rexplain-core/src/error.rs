//! Error types for the explainer
//!
//! The explainer is deliberately permissive: the only hard failure is a
//! pattern the ECMAScript validator refuses to compile. Everything else
//! (unknown flags, truncated constructs, empty block containers) degrades
//! into best-effort output instead of an error.

use thiserror::Error;

/// The main error type for explanation and formatting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExplainError {
    /// The pattern does not compile with the given flags
    #[error("Invalid regular expression: /{pattern}/{flags}: {message}")]
    InvalidPattern {
        /// The pattern that was rejected
        pattern: String,
        /// The flag string it was compiled with
        flags: String,
        /// The compiler diagnostic
        message: String,
    },

    /// A block document could not be deserialized
    #[error("invalid block document: {0}")]
    InvalidBlocks(String),
}

impl ExplainError {
    /// The underlying diagnostic, without the pattern prefix
    pub fn message(&self) -> &str {
        match self {
            ExplainError::InvalidPattern { message, .. } => message,
            ExplainError::InvalidBlocks(message) => message,
        }
    }
}

/// A byte range into a pattern or flag string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single byte
    pub fn single(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text this span covers in `source`
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Result type alias for explainer operations
pub type Result<T> = std::result::Result<T, ExplainError>;
