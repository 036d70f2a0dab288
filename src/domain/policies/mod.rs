//! Domain Policies
//!
//! Business rules that govern which packages are mirrored.

mod selection;

pub use selection::{policy_for, BlanketWorkspace, DeclaredInjection, SelectionPolicy};
