//! Object cache, its reclamation policies, and cache configuration.

pub mod config;
pub mod gc;
pub mod object_cache;

pub use config::{CacheConfig, EnvSnapshot, GcStrategyKind};
pub use gc::GcPolicy;
pub use object_cache::ObjectCache;
