//! Version range tables
//!
//! A [`VersionedMapping`] answers "how is this field encoded at version V".
//! Rules are `(threshold, encoding)` pairs in ascending threshold order; a
//! rule covers `[threshold, next threshold)`. A `None` encoding marks the
//! field as removed from that threshold on.
//!
//! # Resolution
//! - The greatest threshold `<= version` wins
//! - Below the first threshold the result is [`Resolution::Unsupported`],
//!   never the nearest rule
//! - Nothing is cached; every decode call resolves again

use crate::ProtocolVersion;

/// Outcome of resolving a field at one version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<K> {
    /// The field exists and is encoded as `K`
    Wire(K),
    /// The field does not exist at this version
    Unsupported,
}

impl<K> Resolution<K> {
    pub fn ok(self) -> Option<K> {
        match self {
            Resolution::Wire(k) => Some(k),
            Resolution::Unsupported => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Resolution::Wire(_))
    }

    pub fn map<U, F: FnOnce(K) -> U>(self, f: F) -> Resolution<U> {
        match self {
            Resolution::Wire(k) => Resolution::Wire(f(k)),
            Resolution::Unsupported => Resolution::Unsupported,
        }
    }
}

/// Static table of version thresholds to wire encodings
#[derive(Debug, Clone, Copy)]
pub struct VersionedMapping<K: 'static> {
    rules: &'static [(ProtocolVersion, Option<K>)],
}

impl<K: Copy + 'static> VersionedMapping<K> {
    /// Build a mapping from ascending rules.
    ///
    /// Panics (at compile time when used in a `static`) if thresholds are
    /// not strictly ascending.
    pub const fn new(rules: &'static [(ProtocolVersion, Option<K>)]) -> Self {
        let mut i = 1;
        while i < rules.len() {
            if rules[i - 1].0.protocol() >= rules[i].0.protocol() {
                panic!("versioned mapping thresholds must be strictly ascending");
            }
            i += 1;
        }
        Self { rules }
    }

    /// A mapping that never resolves
    pub const fn unsupported() -> Self {
        Self { rules: &[] }
    }

    pub fn resolve(&self, version: ProtocolVersion) -> Resolution<K> {
        let idx = self.rules.partition_point(|(threshold, _)| *threshold <= version);
        if idx == 0 {
            return Resolution::Unsupported;
        }
        match self.rules[idx - 1].1 {
            Some(encoding) => Resolution::Wire(encoding),
            None => Resolution::Unsupported,
        }
    }

    #[inline]
    pub fn get(&self, version: ProtocolVersion) -> Option<K> {
        self.resolve(version).ok()
    }

    #[inline]
    pub fn is_supported(&self, version: ProtocolVersion) -> bool {
        self.resolve(version).is_supported()
    }

    /// First version at which the field exists, if any
    pub fn introduced(&self) -> Option<ProtocolVersion> {
        self.rules
            .iter()
            .find(|(_, encoding)| encoding.is_some())
            .map(|(threshold, _)| *threshold)
    }

    pub fn rules(&self) -> &'static [(ProtocolVersion, Option<K>)] {
        self.rules
    }
}
