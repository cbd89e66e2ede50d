//! GC policy variants and their sweep algorithms.
//!
//! A policy is a plain value selected at cache construction, not a trait
//! object. Each sweep is a total function over the entry map: it decides
//! which soft-deleted entries to purge, removes them in place, and
//! reports the count. Removal is two-pass (collect doomed keys, then
//! remove) so the map is never mutated mid-iteration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::object::{is_deleted_flag, InfoAge, TrackedObject};

/// Reclamation policy bound to a cache at construction time.
///
/// Each variant carries its own typed parameter, so a sweep can never
/// run against a parameter of the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GcPolicy {
    /// Purge soft-deleted entries older than the threshold.
    AgeBased(InfoAge),
    /// Purge all soft-deleted entries once the map grows past the limit.
    SizeBased(u16),
}

impl GcPolicy {
    /// Run one reclamation pass over `entries`, returning the number of
    /// entries removed.
    pub fn sweep<O: TrackedObject>(&self, entries: &mut HashMap<String, O>) -> usize {
        match *self {
            GcPolicy::AgeBased(limit) => sweep_by_age(entries, limit),
            GcPolicy::SizeBased(limit) => sweep_by_size(entries, limit),
        }
    }
}

/// Remove soft-deleted entries whose age exceeds `limit`.
///
/// Soft-deleted entries still inside the grace window stay tracked, so a
/// reader holding the identifier can still resolve it. Entries that are
/// not soft-deleted are never removed, whatever their age.
fn sweep_by_age<O: TrackedObject>(entries: &mut HashMap<String, O>, limit: InfoAge) -> usize {
    let doomed: Vec<String> = entries
        .iter()
        .filter(|(_, obj)| is_deleted_flag(obj.flags()) && obj.age() > limit.as_duration())
        .map(|(id, _)| id.clone())
        .collect();

    for id in &doomed {
        entries.remove(id);
    }

    doomed.len()
}

/// Remove every soft-deleted entry once the map holds more than `limit`
/// entries.
///
/// The limit is a ceiling, not a target: entries that are not
/// soft-deleted are never touched, so the map can stay over the limit
/// after a pass.
// TODO: purge oldest soft-deleted entries first
fn sweep_by_size<O: TrackedObject>(entries: &mut HashMap<String, O>, limit: u16) -> usize {
    if entries.len() <= usize::from(limit) {
        return 0;
    }

    let doomed: Vec<String> = entries
        .iter()
        .filter(|(_, obj)| is_deleted_flag(obj.flags()))
        .map(|(id, _)| id.clone())
        .collect();

    for id in &doomed {
        entries.remove(id);
    }

    doomed.len()
}
