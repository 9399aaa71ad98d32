//! FCPXML schema version identifiers.
//!
//! Versions order component-wise, so `1.9 < 1.10 < 1.13`. Parsing accepts
//! one to three dot-separated non-negative integers (`"1"`, `"1.9"`,
//! `"1.9.1"`); anything else — empty input, non-digits, trailing or doubled
//! separators — is rejected.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A schema version, ordered lexicographically by component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version string: {input:?}")]
pub struct VersionParseError {
    pub input: String,
}

impl Version {
    /// The schema versions this toolkit knows, oldest first.
    pub const KNOWN: [Version; 10] = [
        Version::new(1, 5, 0),
        Version::new(1, 6, 0),
        Version::new(1, 7, 0),
        Version::new(1, 8, 0),
        Version::new(1, 9, 0),
        Version::new(1, 10, 0),
        Version::new(1, 11, 0),
        Version::new(1, 12, 0),
        Version::new(1, 13, 0),
        Version::new(1, 14, 0),
    ];

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The newest known schema version.
    pub fn latest() -> Version {
        Version::KNOWN[Version::KNOWN.len() - 1]
    }

    pub fn is_known(&self) -> bool {
        Version::KNOWN.contains(self)
    }

    /// Position of this version within [`Version::KNOWN`].
    pub fn known_index(&self) -> Option<usize> {
        Version::KNOWN.iter().position(|known| known == self)
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionParseError {
            input: s.to_string(),
        };
        if s.is_empty() {
            return Err(invalid());
        }
        let mut components = [0u32; 3];
        let mut count = 0;
        for part in s.split('.') {
            if count == 3 {
                return Err(invalid());
            }
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            components[count] = part.parse().map_err(|_| invalid())?;
            count += 1;
        }
        Ok(Version::new(components[0], components[1], components[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
