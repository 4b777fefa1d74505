// src/errors.rs
use thiserror::Error;

/// Failures callers can tell apart. A field that simply matched nothing is not
/// an error; it keeps its empty default.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("content did not appear within {waited_ms} ms")]
    Timeout { waited_ms: u64 },

    #[error("invalid locator `{selector}`: {reason}")]
    InvalidLocator { selector: String, reason: String },

    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("document conversion failed: {0}")]
    Conversion(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExtractError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_distinguishable() {
        let err = ExtractError::Timeout { waited_ms: 250 };
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "content did not appear within 250 ms");

        let err = ExtractError::UnsupportedDocument("docx".to_string());
        assert!(!err.is_timeout());
    }
}
