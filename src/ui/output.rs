use depsync::config::ConfigWarning;

use crate::ui::primitives::icon::Icon;

pub fn render_config_warnings(
    warnings: &[ConfigWarning],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let icon = Icon::Warning.colored(supports_color, supports_unicode);
    let mut out = String::new();
    for w in warnings {
        if let Some(line) = w.line {
            out.push_str(&format!(
                "{icon} Unknown config key '{}' in {}:{}\n",
                w.key,
                w.file.display(),
                line
            ));
        } else {
            out.push_str(&format!(
                "{icon} Unknown config key '{}' in {}\n",
                w.key,
                w.file.display()
            ));
        }

        if let Some(suggestion) = &w.suggestion {
            out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
        }
    }
    out
}

pub fn print_config_warnings(warnings: &[ConfigWarning], supports_color: bool, supports_unicode: bool) {
    eprint!(
        "{}",
        render_config_warnings(warnings, supports_color, supports_unicode)
    );
}
