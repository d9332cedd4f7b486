//! Domain error types
//!
//! These errors are framework-agnostic and represent failures while building
//! a classification tree or reading its sources. Per-item classification
//! misses are not errors; see `services::classification_service::SkipReason`.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Numeric portion of a call-number label could not be turned into a range
    MalformedCode(String),
    /// Row text does not carry a usable label for its category
    MalformedLabel(String),
    /// A row is indented deeper than any open ancestor allows
    UnresolvedIndentation { row: usize, depth: usize },
    /// Invalid input that is not tied to a single label
    Validation(String),
    /// Filesystem error
    Io(String),
    /// CSV decoding error
    Csv(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::MalformedCode(code) => write!(f, "Malformed call number: {}", code),
            DomainError::MalformedLabel(text) => write!(f, "Malformed label: {}", text),
            DomainError::UnresolvedIndentation { row, depth } => write!(
                f,
                "Row {} at depth {} has no parent at depth {}",
                row,
                depth,
                depth.saturating_sub(1)
            ),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Io(msg) => write!(f, "IO error: {}", msg),
            DomainError::Csv(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Io(e.to_string())
    }
}

impl From<csv::Error> for DomainError {
    fn from(e: csv::Error) -> Self {
        DomainError::Csv(e.to_string())
    }
}
