//! Domain Entities
//!
//! - `Package` - A workspace member read from its manifest
//! - `SyncMapping` - One source directory mirrored to one destination
//! - `SyncSet` - All mappings for a run, keyed by source directory

mod package;
mod sync_set;

pub use package::{DependencyMeta, Manifest, Package};
pub use sync_set::{SyncMapping, SyncSet};
