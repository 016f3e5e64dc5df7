use std::path::Path;

use crate::colors::{resolve_color, ColorConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptTheme {
    Classic,
    Minimal,
}

pub fn parse_prompt_theme(value: &str) -> Option<PromptTheme> {
    match value.trim().to_lowercase().as_str() {
        "classic" | "default" => Some(PromptTheme::Classic),
        "minimal" => Some(PromptTheme::Minimal),
        _ => None,
    }
}

pub fn render_prompt_template(template: &str, last_status: i32, cwd: &Path) -> String {
    let status_str = last_status.to_string();
    let status_opt = if last_status == 0 { "" } else { &status_str };
    let mut out = template.replace("{status?}", status_opt);
    out = out.replace("{status}", &status_str);
    out = out.replace("{cwd}", &cwd.display().to_string());
    out
}

pub fn render_prompt_theme(
    theme: PromptTheme,
    colors: &ColorConfig,
    last_status: i32,
    cwd: &Path,
) -> String {
    match theme {
        PromptTheme::Minimal => "> ".to_string(),
        PromptTheme::Classic => {
            let status = if last_status == 0 {
                String::new()
            } else {
                format!("{} ", paint(&colors.prompt_status, &format!("[{last_status}]")))
            };
            format!(
                "{status}{} {} ",
                paint(&colors.prompt_cwd, &cwd.display().to_string()),
                paint(&colors.prompt_symbol, "$")
            )
        }
    }
}

fn paint(color: &str, text: &str) -> String {
    let code = resolve_color(color);
    if code.is_empty() {
        text.to_string()
    } else {
        format!("{code}{text}\x1b[0m")
    }
}
