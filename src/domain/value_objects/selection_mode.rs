//! Selection mode value object - which dependencies count as mirrored

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Policy used to pick the workspace packages that get mirrored.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// Only dependencies marked `dependenciesMeta.<name>.injected = true`
    #[default]
    Injected,
    /// Every workspace package listed in dependencies, devDependencies or peerDependencies
    #[serde(alias = "blanket")]
    #[value(alias = "blanket")]
    Workspace,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Injected => "injected",
            SelectionMode::Workspace => "workspace",
        }
    }
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "injected" => Ok(SelectionMode::Injected),
            "workspace" | "blanket" => Ok(SelectionMode::Workspace),
            other => Err(format!(
                "unknown selection mode '{other}' (expected 'injected' or 'workspace')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("Injected".parse::<SelectionMode>(), Ok(SelectionMode::Injected));
        assert_eq!("blanket".parse::<SelectionMode>(), Ok(SelectionMode::Workspace));
        assert!("all".parse::<SelectionMode>().is_err());
    }

    #[test]
    fn default_is_injected() {
        assert_eq!(SelectionMode::default(), SelectionMode::Injected);
    }

    #[test]
    fn deserializes_from_toml_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: SelectionMode,
        }
        let w: Wrapper = toml::from_str("mode = \"workspace\"").unwrap();
        assert_eq!(w.mode, SelectionMode::Workspace);
    }
}
