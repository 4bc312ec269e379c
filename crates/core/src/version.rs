//! Protocol revisions
//!
//! Every release since the 1.7 network rewrite carries a protocol number
//! that only ever grows, so the number itself doubles as the ordering key.
//! Releases that share a protocol number (1.8 through 1.8.9 for example)
//! are one revision as far as the wire is concerned.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One historical revision of the wire format, totally ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProtocolVersion(u32);

/// Entry of the known-revision table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    /// Name of the newest release speaking this protocol
    pub name: &'static str,
    /// Protocol number sent in the handshake
    pub protocol: u32,
}

/// All revisions the decoder has tables for, oldest first
pub static KNOWN_VERSIONS: &[VersionInfo] = &[
    VersionInfo { name: "1.7.5", protocol: 4 },
    VersionInfo { name: "1.7.10", protocol: 5 },
    VersionInfo { name: "1.8.9", protocol: 47 },
    VersionInfo { name: "1.9", protocol: 107 },
    VersionInfo { name: "1.9.1", protocol: 108 },
    VersionInfo { name: "1.9.2", protocol: 109 },
    VersionInfo { name: "1.9.4", protocol: 110 },
    VersionInfo { name: "1.10.2", protocol: 210 },
    VersionInfo { name: "1.11", protocol: 315 },
    VersionInfo { name: "1.11.2", protocol: 316 },
    VersionInfo { name: "1.12", protocol: 335 },
    VersionInfo { name: "1.12.1", protocol: 338 },
    VersionInfo { name: "1.12.2", protocol: 340 },
    VersionInfo { name: "1.13", protocol: 393 },
    VersionInfo { name: "1.13.1", protocol: 401 },
    VersionInfo { name: "1.13.2", protocol: 404 },
    VersionInfo { name: "1.14", protocol: 477 },
    VersionInfo { name: "1.14.1", protocol: 480 },
    VersionInfo { name: "1.14.2", protocol: 485 },
    VersionInfo { name: "1.14.3", protocol: 490 },
    VersionInfo { name: "1.14.4", protocol: 498 },
    VersionInfo { name: "1.15", protocol: 573 },
    VersionInfo { name: "1.15.1", protocol: 575 },
    VersionInfo { name: "1.15.2", protocol: 578 },
    VersionInfo { name: "1.16", protocol: 735 },
    VersionInfo { name: "1.16.1", protocol: 736 },
    VersionInfo { name: "1.16.2", protocol: 751 },
    VersionInfo { name: "1.16.3", protocol: 753 },
    VersionInfo { name: "1.16.5", protocol: 754 },
    VersionInfo { name: "1.17", protocol: 755 },
    VersionInfo { name: "1.17.1", protocol: 756 },
    VersionInfo { name: "1.18.1", protocol: 757 },
    VersionInfo { name: "1.18.2", protocol: 758 },
];

impl ProtocolVersion {
    pub const V1_7_2: Self = Self(4);
    pub const V1_7_10: Self = Self(5);
    pub const V1_8: Self = Self(47);
    pub const V1_9: Self = Self(107);
    pub const V1_9_4: Self = Self(110);
    pub const V1_10: Self = Self(210);
    pub const V1_11: Self = Self(315);
    pub const V1_11_2: Self = Self(316);
    pub const V1_12: Self = Self(335);
    pub const V1_12_2: Self = Self(340);
    /// The flattening: numeric id + metadata gives way to identifiers
    pub const V1_13: Self = Self(393);
    pub const V1_13_2: Self = Self(404);
    pub const V1_14: Self = Self(477);
    pub const V1_14_4: Self = Self(498);
    pub const V1_15: Self = Self(573);
    pub const V1_15_2: Self = Self(578);
    pub const V1_16: Self = Self(735);
    pub const V1_16_2: Self = Self(751);
    pub const V1_16_5: Self = Self(754);
    pub const V1_17: Self = Self(755);
    pub const V1_17_1: Self = Self(756);
    pub const V1_18: Self = Self(757);
    pub const V1_18_2: Self = Self(758);

    pub const OLDEST: Self = Self::V1_7_2;
    pub const LATEST: Self = Self::V1_18_2;

    /// Wrap a raw protocol number, known or not
    pub const fn from_protocol(protocol: u32) -> Self {
        Self(protocol)
    }

    pub const fn protocol(self) -> u32 {
        self.0
    }

    /// Look up a known revision by its handshake number
    pub fn known(protocol: u32) -> Option<Self> {
        KNOWN_VERSIONS
            .iter()
            .find(|info| info.protocol == protocol)
            .map(|info| Self(info.protocol))
    }

    /// Look up a known revision by release name ("1.12.2")
    pub fn by_name(name: &str) -> Option<Self> {
        KNOWN_VERSIONS
            .iter()
            .find(|info| info.name == name)
            .map(|info| Self(info.protocol))
    }

    pub fn info(self) -> Option<&'static VersionInfo> {
        KNOWN_VERSIONS.iter().find(|info| info.protocol == self.0)
    }

    pub fn name(self) -> &'static str {
        self.info().map(|info| info.name).unwrap_or("unknown")
    }

    pub fn is_known(self) -> bool {
        self.info().is_some()
    }

    /// Whether blocks are sent as flattened state ids
    pub fn is_flattened(self) -> bool {
        self >= Self::V1_13
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}
