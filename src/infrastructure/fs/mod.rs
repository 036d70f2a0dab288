//! File System Helpers
//!
//! Hard-linked directory mirroring and path comparison.

mod hard_link;
mod paths;

pub use hard_link::hard_link_dir;
pub use paths::{canonical_alias, nearest_existing_dir, normalize_lexically, same_directory};
