use std::path::PathBuf;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

#[derive(Debug, Clone)]
pub struct ErrorBlock {
    path: Option<PathBuf>,
    message: String,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
            fix: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut out = format!(
            "{} {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error("ERROR").bold().render(supports_color)
        );

        if let Some(path) = &self.path {
            out.push_str(&format!(
                "  {}\n",
                ColoredText::dim(path.display().to_string()).render(supports_color)
            ));
        }
        out.push_str(&format!("  {}\n", self.message));

        if let Some(fix) = &self.fix {
            out.push('\n');
            out.push_str(&format!(
                "  {} FIX: {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                fix
            ));
        }

        out
    }
}
