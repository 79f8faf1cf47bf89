//! Per-parameter errors

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A defect attached to a single query parameter.
///
/// These are shown inline next to the parameter; none of them stop the
/// analysis of other parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParamError {
    #[error("Missing a type cast before the parameter")]
    MissingCast,

    #[error("Invalid parameter cast")]
    InvalidCast,

    #[error("Parameter cast does not resolve to a supported scalar type")]
    UnsupportedType,

    #[error("Parameter has multiple usages with incompatible casts")]
    IncompatibleUsages,
}

impl ParamError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ParamError::MissingCast => "missing-cast",
            ParamError::InvalidCast => "invalid-cast",
            ParamError::UnsupportedType => "unsupported-type",
            ParamError::IncompatibleUsages => "incompatible-usages",
        }
    }
}

impl Serialize for ParamError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ParamError::MissingCast.to_string(),
            "Missing a type cast before the parameter"
        );
        assert_eq!(ParamError::InvalidCast.to_string(), "Invalid parameter cast");
        assert_eq!(ParamError::IncompatibleUsages.code(), "incompatible-usages");
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&ParamError::UnsupportedType).unwrap();
        assert_eq!(
            json,
            "\"Parameter cast does not resolve to a supported scalar type\""
        );
    }
}
