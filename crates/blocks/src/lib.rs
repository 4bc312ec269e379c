//! # Blockwire Blocks
//!
//! Block state registry: maps the numeric block ids found in terrain
//! payloads to interned [`BlockState`] values and back.
//!
//! ## Features
//! - Structural block states with a sorted property set and a single
//!   rotation axis
//! - Per-version tables loaded from JSON definition files
//! - Built-in pre-flattening table (ids 0-255 with color and material
//!   variants)
//! - Version store that picks the nearest table sharing the version's id
//!   encoding
//!
//! ## Id Encodings
//!
//! - **Legacy** (1.7 - 1.12.2): `block id << 4 | metadata`, with lookups
//!   falling back to metadata 0
//! - **Flattened** (1.13+): one id per block state

pub mod definitions;
pub mod error;
pub mod legacy;
pub mod properties;
pub mod registry;
pub mod rotation;
pub mod state;
pub mod store;

pub use definitions::{load_registry, load_registry_file};
pub use error::{RegistryError, Result};
pub use legacy::build_legacy_registry;
pub use properties::{BlockProperty, PropertyValue};
pub use registry::{BlockRegistry, IdEncoding};
pub use rotation::BlockRotation;
pub use state::{BlockState, StateRef, DEFAULT_NAMESPACE};
pub use store::RegistryStore;
