use filecmd::TokenKind;

#[derive(Clone, Debug)]
pub struct ColorConfig {
    pub prompt_status: String,
    pub prompt_cwd: String,
    pub prompt_symbol: String,
    pub keyword: String,
    pub filename: String,
    pub connector: String,
    pub hint: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            prompt_status: "red".to_string(),
            prompt_cwd: "cyan".to_string(),
            prompt_symbol: "green".to_string(),
            keyword: "bold".to_string(),
            filename: "none".to_string(),
            connector: "yellow".to_string(),
            hint: "bright_black".to_string(),
        }
    }
}

impl ColorConfig {
    /// Escape sequence for a token of the given kind, empty when uncolored.
    pub fn for_token(&self, kind: TokenKind) -> String {
        match kind {
            TokenKind::Keyword => resolve_color(&self.keyword),
            TokenKind::Filename => resolve_color(&self.filename),
            TokenKind::Connector => resolve_color(&self.connector),
            TokenKind::EndOfInput => String::new(),
        }
    }
}

pub fn resolve_color(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return String::new();
    }
    if let Some(rest) = trimmed.strip_prefix("ansi:") {
        return rest.to_string();
    }
    if trimmed.contains("\x1b") {
        return trimmed.to_string();
    }
    match trimmed.to_lowercase().as_str() {
        "black" => "\x1b[30m",
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",
        "bright_black" | "gray" | "grey" => "\x1b[90m",
        "bright_red" => "\x1b[91m",
        "bright_green" => "\x1b[92m",
        "bright_yellow" => "\x1b[93m",
        "bright_blue" => "\x1b[94m",
        "bright_cyan" => "\x1b[96m",
        "bold" => "\x1b[1m",
        "dim" => "\x1b[2m",
        _ => "",
    }
    .to_string()
}

pub fn apply_color_setting(config: &mut ColorConfig, key: &str, value: &str) -> Result<(), String> {
    match key {
        "prompt_status" => config.prompt_status = value.to_string(),
        "prompt_cwd" => config.prompt_cwd = value.to_string(),
        "prompt_symbol" => config.prompt_symbol = value.to_string(),
        "keyword" => config.keyword = value.to_string(),
        "filename" => config.filename = value.to_string(),
        "connector" => config.connector = value.to_string(),
        "hint" => config.hint = value.to_string(),
        _ => return Err(format!("unknown color key '{key}'")),
    }
    Ok(())
}
