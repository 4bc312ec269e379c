//! Error types for the blocks crate
//!
//! Everything here is a load-time problem: a definition table that does not
//! match the known vocabulary is a packaging bug, not a per-message
//! condition.

use blockwire_core::{ProtocolVersion, WireError};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Invalid definition JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Property name outside the known vocabulary
    #[error("Unknown property '{name}' on {identifier}")]
    UnknownProperty { identifier: String, name: String },

    /// Known property name with a value it cannot take
    #[error("Unknown value '{value}' for property '{name}' on {identifier}")]
    UnknownPropertyValue {
        identifier: String,
        name: String,
        value: String,
    },

    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("Invalid metadata {meta} for {identifier} (must be 0-15)")]
    InvalidMeta { identifier: String, meta: u32 },

    #[error("Legacy block id {id} for {identifier} does not fit in 16 bits")]
    LegacyIdOutOfRange { identifier: String, id: u32 },

    #[error("Block id {id} defined twice ({existing} and {duplicate})")]
    DuplicateId {
        id: u32,
        existing: String,
        duplicate: String,
    },

    #[error("Block state {state} defined under ids {existing} and {duplicate}")]
    DuplicateState {
        state: String,
        existing: u32,
        duplicate: u32,
    },

    #[error("No block table available for {0}")]
    NoTable(ProtocolVersion),
}

impl From<RegistryError> for WireError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::FileError(io) => WireError::Io(io),
            other => WireError::UnknownDefinition(other.to_string()),
        }
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
