//! Parser error types

use eqlkit_syntax::Span;
use thiserror::Error;

/// Failures that prevent any tree from being built.
///
/// Malformed input is not one of them: it becomes error nodes inside the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expression nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize, span: Span },

    #[error("input of {len} bytes is too large to parse")]
    InputTooLarge { len: usize },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::NestingTooDeep { span, .. } => *span,
            ParseError::InputTooLarge { len } => Span::new(0, *len),
        }
    }
}
