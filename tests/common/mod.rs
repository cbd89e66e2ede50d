// Test utility module for objcache integration tests
#![allow(dead_code)]

use objcache::TrackedObject;
use std::time::Duration;

/// Initialize test logging so gc diagnostics show up under
/// `RUST_LOG=debug cargo test`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Minimal collaborator with a manually advanced age.
///
/// Real callers derive age from a timestamp; tests drive it directly so
/// grace-period behavior is deterministic.
#[derive(Debug, Default)]
pub struct TestObject {
    flags: u8,
    age: Duration,
}

impl TestObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age(age: Duration) -> Self {
        Self { flags: 0, age }
    }

    pub fn set_age(&mut self, age: Duration) {
        self.age = age;
    }
}

impl TrackedObject for TestObject {
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
