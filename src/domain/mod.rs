//! Domain Layer
//!
//! The sync model: packages, the mappings derived from them, and the
//! interfaces the engine consumes.
//!
//! ## Structure
//!
//! - `entities/` - Package, Manifest, SyncMapping, SyncSet
//! - `value_objects/` - SelectionMode, MirrorOutcome, LinkStats
//! - `policies/` - Which workspace packages count as mirrored
//! - `services/` - Sync-set construction
//! - `ports/` - Interface definitions for infrastructure
//!
//! This layer never touches the file system directly; all I/O goes
//! through the traits in `ports`.

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
