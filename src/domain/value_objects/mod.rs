//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod mirror_outcome;
mod selection_mode;

pub use mirror_outcome::{LinkStats, MirrorOutcome, SkipReason};
pub use selection_mode::SelectionMode;
