//! Test fixtures - manifest builders for workspace packages.

use serde_json::{json, Value};

/// `pnpm-workspace.yaml` covering `packages/*` and `apps/*`.
pub const WORKSPACE_YAML: &str = "packages:\n  - 'packages/*'\n  - 'apps/*'\n";

/// Root `package.json` (private, no dependencies).
pub fn root_manifest() -> Value {
    json!({ "name": "monorepo", "private": true })
}

/// A library that publishes `files`.
pub fn library_manifest(name: &str, files: &[&str]) -> Value {
    json!({
        "name": name,
        "version": "1.0.0",
        "files": files,
    })
}

/// A library with `exports` but no `files` entry.
pub fn exports_only_manifest(name: &str) -> Value {
    json!({
        "name": name,
        "version": "1.0.0",
        "exports": { ".": "./dist/index.js" },
    })
}

/// An app depending on `deps`, with `injected` ones marked in `dependenciesMeta`.
pub fn app_manifest(name: &str, deps: &[&str], injected: &[&str]) -> Value {
    let dependencies: serde_json::Map<String, Value> = deps
        .iter()
        .map(|d| (d.to_string(), json!("workspace:*")))
        .collect();
    let meta: serde_json::Map<String, Value> = injected
        .iter()
        .map(|d| (d.to_string(), json!({ "injected": true })))
        .collect();

    let mut manifest = json!({
        "name": name,
        "version": "0.0.0",
        "dependencies": dependencies,
    });
    if !injected.is_empty() {
        manifest["dependenciesMeta"] = Value::Object(meta);
    }
    manifest
}
