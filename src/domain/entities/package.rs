//! Package entity
//!
//! A workspace package as described by its `package.json`. Read fresh on
//! every invocation, never mutated.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Per-dependency metadata (`dependenciesMeta.<name>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DependencyMeta {
    #[serde(default)]
    pub injected: bool,
}

/// The subset of `package.json` the sync engine reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub dependencies_meta: Option<BTreeMap<String, DependencyMeta>>,

    /// Published sub-paths. `None` when the manifest has no `files` key.
    #[serde(default)]
    pub files: Option<Vec<String>>,

    #[serde(default)]
    pub exports: Option<serde_json::Value>,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Package name, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Names marked `injected: true` under `dependenciesMeta`.
    ///
    /// Returns `None` when the manifest has no `dependenciesMeta` map at all.
    pub fn injected_dependencies(&self) -> Option<BTreeSet<&str>> {
        let meta = self.dependencies_meta.as_ref()?;
        Some(
            meta.iter()
                .filter(|(_, m)| m.injected)
                .map(|(name, _)| name.as_str())
                .collect(),
        )
    }

    /// True when `name` appears in regular, dev or peer dependencies.
    pub fn declares_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
            || self.dev_dependencies.contains_key(name)
            || self.peer_dependencies.contains_key(name)
    }

    pub fn has_exports(&self) -> bool {
        self.exports.is_some()
    }
}

/// A workspace member: its root directory and manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    root: PathBuf,
    manifest: Manifest,
}

impl Package {
    pub fn new(root: impl Into<PathBuf>, manifest: Manifest) -> Self {
        Self {
            root: root.into(),
            manifest,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.manifest.name()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}
