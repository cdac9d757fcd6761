// Error types shared by the codecs, the descriptor layer and the XMSS engines

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QrlError {
    /// Input has the wrong shape for the codec (odd hex length, bad mnemonic byte count)
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A character outside [0-9a-fA-F] in a hex string
    #[error("Invalid hex digit {digit:?} at position {position}")]
    InvalidDigit { digit: char, position: usize },

    /// Mnemonic token not present in the word list
    #[error("invalid word in mnemonic: {0}")]
    UnknownWord(String),

    /// Mnemonic phrases encode 3 bytes per 2 words
    #[error("word count = {0} must be even")]
    OddWordCount(usize),

    /// Height, seed size, descriptor code or similar parameter rejected
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Requested leaf index cannot be reached from the current state
    #[error("Index {index} out of range: {reason}")]
    IndexOutOfRange { index: u64, reason: String },

    /// All 2^h one-time leaves have been consumed
    #[error("Signing key exhausted after {signatures} signatures")]
    Exhausted { signatures: u64 },

    /// Byte input with a length or content no operation accepts
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Signature bytes whose length cannot match any tree height
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    /// Key or seed material shorter than its fixed layout
    #[error("Truncated key: expected {expected} bytes, got {actual}")]
    TruncatedKey { expected: usize, actual: usize },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for QrlError {
    fn from(err: serde_json::Error) -> Self {
        QrlError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QrlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_variants_render_their_fields() {
        let err = QrlError::InvalidDigit {
            digit: 'z',
            position: 3,
        };
        assert!(err.to_string().contains("'z'"));
        assert!(err.to_string().contains("position 3"));

        let err = QrlError::OddWordCount(3);
        assert_eq!(err.to_string(), "word count = 3 must be even");

        let err = QrlError::IndexOutOfRange {
            index: 16,
            reason: "index too high".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("16"), "Should contain the index");
        assert!(msg.contains("index too high"), "Should contain the reason");

        let err = QrlError::TruncatedKey {
            expected: 132,
            actual: 10,
        };
        assert!(err.to_string().contains("132"));
        assert!(err.to_string().contains("10"));

        let err = QrlError::Exhausted { signatures: 16 };
        assert!(err.to_string().contains("exhausted"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parsed: std::result::Result<u32, serde_json::Error> = serde_json::from_str("{not json");
        match parsed {
            Err(json_err) => {
                let err: QrlError = json_err.into();
                match err {
                    QrlError::Serialization(msg) => {
                        assert!(!msg.is_empty(), "Error message should not be empty")
                    }
                    _ => panic!("Expected Serialization variant"),
                }
            }
            Ok(_) => panic!("Expected serde_json error"),
        }
    }

    #[test]
    fn test_error_display_human_readable() {
        let errors = vec![
            QrlError::InvalidEncoding("odd length".to_string()),
            QrlError::UnknownWord("qwerty".to_string()),
            QrlError::InvalidParameters("height must be even".to_string()),
            QrlError::MalformedInput("pk length 3".to_string()),
            QrlError::MalformedSignature("size 1000".to_string()),
            QrlError::Serialization("failed".to_string()),
        ];

        for err in errors {
            let msg = err.to_string();
            assert!(msg.len() > 10, "Error message should be descriptive: {msg}");
        }
    }
}
