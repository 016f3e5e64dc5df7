use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::colors::{apply_color_setting, ColorConfig};
use crate::error::{ErrorKind, ShellError};
use crate::prompt::{parse_prompt_theme, render_prompt_template, render_prompt_theme, PromptTheme};

#[derive(Clone, Debug)]
pub struct Settings {
    pub prompt_template: Option<String>,
    pub prompt_theme: PromptTheme,
    pub colors: ColorConfig,
    /// Reject trailing words after `exit` too.
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt_template: None,
            prompt_theme: PromptTheme::Classic,
            colors: ColorConfig::default(),
            strict: false,
        }
    }
}

pub fn build_prompt(interactive: bool, settings: &Settings, last_status: i32, cwd: &Path) -> String {
    if !interactive {
        return String::new();
    }
    match settings.prompt_template {
        Some(ref template) => render_prompt_template(template, last_status, cwd),
        None => render_prompt_theme(settings.prompt_theme, &settings.colors, last_status, cwd),
    }
}

/// `$FILECMD_RC`, else `$HOME/.filecmdrc`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("FILECMD_RC") {
        return Some(PathBuf::from(path));
    }
    let home = env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".filecmdrc"))
}

/// Load the rc file into `settings`. A missing file is not an error; bad lines
/// are returned so the caller can report them.
pub fn load_config(settings: &mut Settings) -> io::Result<Vec<ShellError>> {
    let Some(path) = config_path() else {
        return Ok(Vec::new());
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };
    Ok(apply_config(settings, &content))
}

pub fn apply_config(settings: &mut Settings, content: &str) -> Vec<ShellError> {
    let mut errors = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(msg) = apply_line(settings, line) {
            errors.push(
                ShellError::new(ErrorKind::Config, msg).with_context(format!("line {}", idx + 1)),
            );
        }
    }
    errors
}

fn apply_line(settings: &mut Settings, line: &str) -> Result<(), String> {
    let (key, value) = line
        .split_once('=')
        .ok_or_else(|| "unrecognized directive".to_string())?;
    let key = key.trim();
    let value = strip_quotes(value.trim());
    if let Some(color_key) = key.strip_prefix("color.") {
        return apply_color_setting(&mut settings.colors, color_key, value);
    }
    match key {
        "prompt" | "PROMPT" => settings.prompt_template = Some(value.to_string()),
        "theme" => {
            settings.prompt_theme =
                parse_prompt_theme(value).ok_or_else(|| format!("unknown theme '{value}'"))?;
        }
        "strict" => {
            settings.strict =
                parse_bool(value).ok_or_else(|| format!("invalid boolean '{value}' for strict"))?;
        }
        _ => return Err(format!("unknown key '{key}'")),
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn strip_quotes(input: &str) -> &str {
    let bytes = input.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &input[1..bytes.len() - 1];
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_keys_apply() {
        let mut settings = Settings::default();
        let errors = apply_config(
            &mut settings,
            "# comment\n\nprompt = \"{cwd}> \"\ntheme=minimal\nstrict = yes\ncolor.keyword = red\n",
        );
        assert!(errors.is_empty());
        assert_eq!(settings.prompt_template.as_deref(), Some("{cwd}> "));
        assert_eq!(settings.prompt_theme, PromptTheme::Minimal);
        assert!(settings.strict);
        assert_eq!(settings.colors.keyword, "red");
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let mut settings = Settings::default();
        let errors = apply_config(
            &mut settings,
            "strict = maybe\nbogus\ncolor.nope = red\ntheme = fish\nvolume = 11\nstrict = on\n",
        );
        let shown: Vec<String> = errors.iter().map(|e| e.display_simple()).collect();
        assert_eq!(
            shown,
            vec![
                "Config error: invalid boolean 'maybe' for strict\n  hint: line 1",
                "Config error: unrecognized directive\n  hint: line 2",
                "Config error: unknown color key 'nope'\n  hint: line 3",
                "Config error: unknown theme 'fish'\n  hint: line 4",
                "Config error: unknown key 'volume'\n  hint: line 5",
            ]
        );
        assert!(settings.strict);
    }

    #[test]
    fn prompt_only_when_interactive() {
        let mut settings = Settings::default();
        assert_eq!(build_prompt(false, &settings, 0, Path::new("/")), "");
        settings.prompt_template = Some("{status?}> ".to_string());
        assert_eq!(build_prompt(true, &settings, 2, Path::new("/")), "2> ");
    }
}
