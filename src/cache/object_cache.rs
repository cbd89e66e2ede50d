//! Identifier-keyed object cache with caller-triggered reclamation.
//!
//! Deletion is two-phase: callers mark entries deleted, then a separate
//! GC pass physically removes them according to the bound policy. No
//! operation reclaims implicitly, so callers can batch GC, drive it from
//! a timer, or skip it entirely under load.

use std::collections::HashMap;

use crate::cache::config::CacheConfig;
use crate::cache::gc::GcPolicy;
use crate::core::object::{is_deleted_flag, InfoAge, TrackedObject, FLAG_DELETED};
use crate::errors::CacheError;

/// Tracks presence and soft-deletion state of identifier-keyed objects.
///
/// The entry map is exclusively owned by the cache; all mutation goes
/// through the methods below. The GC policy and its parameter are fixed
/// at construction for the cache's entire lifetime.
#[derive(Debug)]
pub struct ObjectCache<O> {
    entries: HashMap<String, O>,
    policy: GcPolicy,
}

impl<O: TrackedObject> ObjectCache<O> {
    /// Cache bound to the size-based policy with the given entry limit.
    ///
    /// A zero limit is legal and reclaims almost eagerly.
    pub fn fixed_size(max_size: u16) -> Self {
        Self::with_policy(GcPolicy::SizeBased(max_size))
    }

    /// Cache bound to the age-based policy with the given threshold.
    pub fn time_window(max_age: InfoAge) -> Self {
        Self::with_policy(GcPolicy::AgeBased(max_age))
    }

    /// Cache configured from an environment-derived [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_policy(config.policy())
    }

    fn with_policy(policy: GcPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
        }
    }

    /// The policy fixed at construction.
    pub fn policy(&self) -> GcPolicy {
        self.policy
    }

    /// Track `object` under `id`, returning any displaced object.
    pub fn insert(&mut self, id: impl Into<String>, object: O) -> Option<O> {
        self.entries.insert(id.into(), object)
    }

    /// Untrack `id` and yield its object.
    pub fn remove(&mut self, id: &str) -> Option<O> {
        self.entries.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&O> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut O> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set the soft-delete bit on `id`, leaving the entry tracked.
    ///
    /// Returns `false` when the identifier is not tracked. A delete
    /// racing ahead of a GC pass is normal caller behavior, so absence
    /// here is a query-style miss rather than an error.
    pub fn mark_deleted(&mut self, id: &str) -> bool {
        match self.entries.get_mut(id) {
            Some(obj) => {
                obj.set_flags(FLAG_DELETED);
                true
            }
            None => false,
        }
    }

    /// Current value of the soft-delete bit for `id`.
    ///
    /// Unlike [`mark_deleted`](Self::mark_deleted), querying an
    /// untracked identifier indicates caller misuse and fails with
    /// [`CacheError::ObjectNotFound`].
    pub fn is_deleted(&self, id: &str) -> Result<bool, CacheError> {
        match self.entries.get(id) {
            Some(obj) => Ok(is_deleted_flag(obj.flags())),
            None => Err(CacheError::not_found(id)),
        }
    }

    /// Run one reclamation pass with the bound policy.
    ///
    /// Fire-and-forget: the pass removes zero or more soft-deleted
    /// entries in place and logs a diagnostic when anything was removed.
    pub fn gc(&mut self) {
        let before = self.entries.len();
        let removed = self.policy.sweep(&mut self.entries);
        debug_assert_eq!(before - self.entries.len(), removed);

        if removed > 0 {
            log::debug!(
                "gc: {} items removed - object-cnt: {}",
                removed,
                self.entries.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct TestObj {
        flags: u8,
        age: Duration,
    }

    impl TrackedObject for TestObj {
        fn flags(&self) -> u8 {
            self.flags
        }

        fn set_flags(&mut self, value: u8) {
            self.flags = value;
        }

        fn age(&self) -> Duration {
            self.age
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut cache = ObjectCache::fixed_size(8);
        assert!(cache.is_empty());

        assert!(cache.insert("a", TestObj::default()).is_none());
        assert!(cache.insert("a", TestObj::default()).is_some());
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("a"));
        assert!(cache.get("a").is_some());
        assert!(cache.remove("a").is_some());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_mark_deleted_is_idempotent() {
        let mut cache = ObjectCache::fixed_size(8);
        cache.insert("a", TestObj::default());

        assert!(cache.mark_deleted("a"));
        assert!(cache.mark_deleted("a"));
        assert_eq!(cache.is_deleted("a").unwrap(), true);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_absent_id_is_soft_miss_for_mark_and_hard_error_for_query() {
        let mut cache: ObjectCache<TestObj> = ObjectCache::fixed_size(8);

        assert!(!cache.mark_deleted("missing"));

        let err = cache.is_deleted("missing").unwrap_err();
        assert!(matches!(
            err,
            CacheError::ObjectNotFound { ref id } if id == "missing"
        ));
    }

    #[test]
    fn test_mark_deleted_does_not_remove_entry() {
        let mut cache = ObjectCache::fixed_size(8);
        cache.insert("a", TestObj::default());

        cache.mark_deleted("a");

        assert!(cache.contains("a"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_gc_over_capacity_purges_marked_entries() {
        let mut cache = ObjectCache::fixed_size(2);
        cache.insert("a", TestObj::default());
        cache.insert("b", TestObj::default());
        cache.insert("c", TestObj::default());
        cache.mark_deleted("a");
        cache.mark_deleted("b");

        cache.gc();

        assert_eq!(cache.len(), 1);
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_gc_time_window_waits_out_grace_period() {
        let mut cache = ObjectCache::time_window(InfoAge::from_millis(1_000));
        cache.insert("x", TestObj::default());
        cache.mark_deleted("x");

        cache.gc();
        assert_eq!(cache.len(), 1);

        cache.get_mut("x").unwrap().age = Duration::from_millis(1_500);
        cache.gc();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_accessors_never_trigger_reclamation() {
        let mut cache = ObjectCache::fixed_size(1);
        cache.insert("a", TestObj::default());
        cache.insert("b", TestObj::default());
        cache.mark_deleted("a");

        // Lookups and inserts leave the marked entry alone until gc runs.
        let _ = cache.get("a");
        let _ = cache.contains("b");
        cache.insert("c", TestObj::default());
        assert_eq!(cache.len(), 3);

        cache.gc();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_policy_is_fixed_at_construction() {
        let cache: ObjectCache<TestObj> = ObjectCache::time_window(InfoAge::from_millis(42));
        assert_eq!(cache.policy(), GcPolicy::AgeBased(InfoAge::from_millis(42)));

        let cache: ObjectCache<TestObj> = ObjectCache::fixed_size(7);
        assert_eq!(cache.policy(), GcPolicy::SizeBased(7));
    }
}
