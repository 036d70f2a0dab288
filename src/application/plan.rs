//! Sync planning
//!
//! Reads the project and its workspace, then builds the sync set.

use std::path::{Path, PathBuf};

use crate::domain::entities::{Package, SyncSet};
use crate::domain::ports::{PackageLocator, SyncEvent, SyncEventSink, Workspace};
use crate::domain::services::SyncSetBuilder;
use crate::domain::value_objects::SelectionMode;
use crate::error::DepsyncResult;

/// Everything a sync or watch run needs to know up front.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub workspace_root: PathBuf,
    pub project: Package,
    pub mode: SelectionMode,
    pub sync_set: SyncSet,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.sync_set.is_empty()
    }

    /// Hint shown when nothing was selected.
    pub fn empty_hint(&self) -> Option<&'static str> {
        match (self.is_empty(), self.mode) {
            (true, SelectionMode::Injected) => {
                Some("Did you forget dependenciesMeta.*.injected?")
            }
            _ => None,
        }
    }
}

/// Build the plan for the project at `directory`.
pub fn plan_sync(
    directory: &Path,
    mode: SelectionMode,
    workspace: &dyn Workspace,
    locator: &dyn PackageLocator,
    events: &dyn SyncEventSink,
) -> DepsyncResult<SyncPlan> {
    let directory = directory.canonicalize()?;
    let workspace_root = workspace.find_root(&directory)?;
    let workspace_root = workspace_root.canonicalize().unwrap_or(workspace_root);
    tracing::debug!(root = %workspace_root.display(), "found workspace root");

    let project = Package::new(&directory, workspace.read_manifest(&directory)?);

    let injects_nothing = project
        .manifest()
        .injected_dependencies()
        .map_or(true, |deps| deps.is_empty());

    let sync_set = if mode == SelectionMode::Injected && injects_nothing {
        tracing::debug!(project = %directory.display(), "no injected dependencies declared");
        SyncSet::new()
    } else {
        let packages = workspace.list_packages(&workspace_root)?;
        tracing::debug!(count = packages.len(), "listed workspace packages");
        SyncSetBuilder::new(locator).build(&project, &packages, mode)?
    };

    events.on_event(SyncEvent::PlanBuilt {
        mode,
        packages: sync_set.package_count(),
        mappings: sync_set.len(),
    });

    Ok(SyncPlan {
        workspace_root,
        project,
        mode,
        sync_set,
    })
}
