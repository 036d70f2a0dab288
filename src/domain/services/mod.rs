//! Domain Services
//!
//! Stateless operations over domain entities.

mod sync_set_builder;

pub use sync_set_builder::{normalize_files_entry, SyncSetBuilder};
