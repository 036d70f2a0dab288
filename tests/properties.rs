//! Property tests for depsync.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "one mapping per source".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/files_entry.rs"]
mod files_entry;

#[path = "properties/sync_set_keys.rs"]
mod sync_set_keys;

#[path = "properties/path_handling.rs"]
mod path_handling;
