//! Blockwire Core - Protocol versions, version-range tables and shared types

mod error;
mod mapping;
mod positions;
mod types;
mod version;

pub use error::*;
pub use mapping::*;
pub use positions::*;
pub use types::*;
pub use version::*;
