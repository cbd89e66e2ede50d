//! Core collaborator-facing types shared across the crate.

pub mod object;

pub use object::{is_deleted_flag, InfoAge, TrackedObject, FLAG_DELETED};
