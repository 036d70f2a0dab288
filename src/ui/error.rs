use depsync::error::DepsyncError;

use crate::ui::blocks::error::ErrorBlock;

pub fn format_depsync_error(err: &DepsyncError) -> String {
    let caps = crate::ui::terminal::detect_capabilities();
    format_depsync_error_with(err, caps.supports_color, caps.supports_unicode)
}

fn format_depsync_error_with(
    err: &DepsyncError,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut block = ErrorBlock::new(err.to_string());
    if let Some(path) = err.path() {
        block = block.with_path(path);
    }
    if let Some(fix) = fix_for(err) {
        block = block.with_fix(fix);
    }
    block.render(supports_color, supports_unicode)
}

fn fix_for(err: &DepsyncError) -> Option<&'static str> {
    match err {
        DepsyncError::WorkspaceRootNotFound { .. } => Some(
            "Run depsync inside a pnpm workspace, or set NPM_CONFIG_WORKSPACE_DIR.",
        ),
        DepsyncError::ManifestNotFound { .. } => {
            Some("Point --directory at a package that has a package.json.")
        }
        DepsyncError::PackageNotFound { .. } => {
            Some("Run 'pnpm install' so the dependency is present in node_modules.")
        }
        DepsyncError::MissingFilesDeclaration { .. } => {
            Some("Add a \"files\" array (for example [\"dist\"]) to its package.json.")
        }
        DepsyncError::SelfSync { .. } => Some(
            "The installed copy resolves to its own source. Mark the dependency as injected so pnpm installs a copy.",
        ),
        DepsyncError::Config { .. } => Some("Fix or remove depsync.toml."),
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error) -> String {
    if let Some(depsync) = err.downcast_ref::<DepsyncError>() {
        return format_depsync_error(depsync);
    }

    format!("[ERROR] {:#}\n", err)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        });
        let _ = crate::ui::json::emit(&output);
        return;
    }

    eprint!("{}", format_error(err));
}
