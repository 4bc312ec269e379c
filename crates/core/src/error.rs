//! Core error types for Blockwire

use crate::ProtocolVersion;

#[derive(thiserror::Error, Debug)]
pub enum WireError {
    /// Tried to read more bytes than the payload holds
    #[error("Unexpected end of buffer at {position}: needed {needed} bytes, {remaining} remaining")]
    EndOfBuffer {
        position: usize,
        needed: usize,
        remaining: usize,
    },

    /// Lengths, counts or values inconsistent with the wire format
    #[error("Malformed data: {0}")]
    Malformed(String),

    /// The field has no encoding at the active version
    #[error("Unsupported at {version}: {feature}")]
    Unsupported {
        feature: &'static str,
        version: ProtocolVersion,
    },

    /// A definition table references something with no known mapping
    #[error("Unknown definition: {0}")]
    UnknownDefinition(String),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WireError {
    /// Whether decoding can continue with the next message (or column,
    /// or entity) after this error.
    ///
    /// Definition and IO errors happen while loading tables and are not
    /// recoverable at message granularity.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WireError::EndOfBuffer { .. }
                | WireError::Malformed(_)
                | WireError::Unsupported { .. }
                | WireError::Compression(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        let eob = WireError::EndOfBuffer {
            position: 3,
            needed: 4,
            remaining: 1,
        };
        assert!(eob.is_recoverable());
        assert!(WireError::Malformed("bad".into()).is_recoverable());
        assert!(!WireError::UnknownDefinition("minecraft:nope".into()).is_recoverable());
    }

    #[test]
    fn test_end_of_buffer_message() {
        let err = WireError::EndOfBuffer {
            position: 10,
            needed: 8,
            remaining: 2,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected end of buffer at 10: needed 8 bytes, 2 remaining"
        );
    }
}
