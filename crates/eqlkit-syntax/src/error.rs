//! Recoverable syntax diagnostics

use serde::Serialize;
use thiserror::Error;

use crate::Span;

/// A malformed region the parser recovered from.
///
/// Every diagnostic has a matching error node in the tree; the diagnostic
/// carries the human readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}
