//! # Blockwire Entities
//!
//! Typed access to entity metadata across protocol versions.
//!
//! ## Features
//! - Entity kind hierarchy with per-version claimed key runs
//! - Data-driven field layouts: absolute keys for 1.7/1.8, offsets past
//!   the parent's last claimed key from 1.9
//! - [`EntityData`] merging partial updates, with lazy typed getters that
//!   fall back to documented defaults
//!
//! ## Key Assignment
//!
//! From 1.9 a kind's first field sits at `last claimed key of parent + 1`.
//! The last claimed key is the sum of every ancestor's run minus one, so
//! inserting a field into a base kind shifts every descendant without any
//! per-kind key tables.
//!
//! ## Usage Example
//!
//! ```rust
//! use blockwire_core::ProtocolVersion;
//! use blockwire_entities::{EntityData, EntityKind};
//! use blockwire_protocol::{AttributeSet, AttributeValue};
//!
//! let mut arrow = EntityData::new(EntityKind::Arrow, ProtocolVersion::V1_14_4);
//! let update: AttributeSet = [(7, AttributeValue::Byte(0x01))].into_iter().collect();
//! arrow.apply(update);
//! assert!(arrow.is_critical());
//! ```

pub mod armor_stand;
pub mod data;
pub mod entity;
pub mod horse;
pub mod kind;
pub mod layout;
pub mod living;
pub mod minecart;
pub mod monster;
pub mod player;
pub mod projectile;

pub use data::EntityData;
pub use kind::EntityKind;
pub use layout::{Field, FieldLayout, SlotRule};
pub use living::Hand;
pub use player::MainHand;
