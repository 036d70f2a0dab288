//! Selection policy
//!
//! Decides whether a workspace package is one the owning project consumes as
//! a live build artifact. Both historical strategies sit behind one trait and
//! are picked by `SelectionMode`.

use crate::domain::entities::Manifest;
use crate::domain::value_objects::SelectionMode;

/// Decides which workspace packages are mirrored into the owning project.
pub trait SelectionPolicy: Send + Sync {
    /// True when the package named `candidate` must be mirrored.
    fn selects(&self, project: &Manifest, candidate: &str) -> bool;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Selects dependencies marked `injected: true` under `dependenciesMeta`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredInjection;

impl SelectionPolicy for DeclaredInjection {
    fn selects(&self, project: &Manifest, candidate: &str) -> bool {
        project
            .dependencies_meta
            .as_ref()
            .and_then(|meta| meta.get(candidate))
            .is_some_and(|m| m.injected)
    }

    fn name(&self) -> &'static str {
        "injected"
    }
}

/// Selects every workspace package the project depends on in any way.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlanketWorkspace;

impl SelectionPolicy for BlanketWorkspace {
    fn selects(&self, project: &Manifest, candidate: &str) -> bool {
        project.declares_dependency(candidate)
    }

    fn name(&self) -> &'static str {
        "workspace"
    }
}

/// Policy for a mode flag.
pub fn policy_for(mode: SelectionMode) -> &'static dyn SelectionPolicy {
    match mode {
        SelectionMode::Injected => &DeclaredInjection,
        SelectionMode::Workspace => &BlanketWorkspace,
    }
}
