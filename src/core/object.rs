//! Tracked-object capability surface and the age threshold type.
//!
//! The cache never looks inside an object's payload. It consumes exactly
//! three capabilities from its collaborator: the status flags, flag
//! mutation, and an age measurement the implementor computes however it
//! likes (wall clock, logical clock, test-controlled field).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::CacheError;

/// Mask for the soft-delete status bit (bit 0).
pub const FLAG_DELETED: u8 = 0x01;

/// Test the soft-delete bit of a raw flags byte.
pub fn is_deleted_flag(flags: u8) -> bool {
    flags & FLAG_DELETED == FLAG_DELETED
}

/// Capabilities the cache consumes from a tracked object.
///
/// Implementors own the payload and the age computation; the cache only
/// tracks presence and the soft-delete bit.
pub trait TrackedObject {
    /// Bit-encoded status. Bit 0 is the soft-delete bit.
    fn flags(&self) -> u8;

    /// Set the status bits.
    fn set_flags(&mut self, value: u8);

    /// Elapsed time since the object's creation or last reset.
    fn age(&self) -> Duration;
}

/// Age threshold for the age-based GC policy.
///
/// Parses from and renders as a whole number of milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InfoAge(Duration);

impl InfoAge {
    pub fn from_millis(ms: u64) -> Self {
        InfoAge(Duration::from_millis(ms))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl From<Duration> for InfoAge {
    fn from(d: Duration) -> Self {
        InfoAge(d)
    }
}

impl From<InfoAge> for Duration {
    fn from(age: InfoAge) -> Self {
        age.0
    }
}

impl FromStr for InfoAge {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ms: u64 = s.parse().map_err(|source| CacheError::InvalidAge {
            value: s.to_string(),
            source,
        })?;
        Ok(InfoAge::from_millis(ms))
    }
}

impl fmt::Display for InfoAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_millis())
    }
}
