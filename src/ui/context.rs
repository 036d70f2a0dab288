use depsync::config::{ColorMode, Config, Verbosity};

use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbosity: Verbosity,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, cli_color: Option<ColorMode>, config: &Config) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, cli_color, config, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        cli_color: Option<ColorMode>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color.unwrap_or(config.output.color) {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        Self {
            json,
            verbosity: config.output.verbosity,
            caps,
            color: color && !json,
            unicode,
        }
    }

    /// Skips and dropped changes are only shown at verbose level.
    pub fn shows_detail(&self) -> bool {
        self.verbosity.shows_detail()
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }
}
