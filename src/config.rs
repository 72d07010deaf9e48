//! User configuration and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/folder-opener/config.toml` (default
//! `~/.config/folder-opener/config.toml`).

use std::path::PathBuf;

use crate::core::{context::DEFAULT_CHOOSER_TITLE, strategy::Strategy};
use crate::platform::{am::DEFAULT_AM_PATH, props::DEFAULT_GETPROP_PATH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Activity-manager binary used to issue launch requests.
    pub am_path: PathBuf,
    /// Used to detect the API level when `sdk_int` is unset.
    pub getprop_path: PathBuf,
    /// Fixed API level; skips detection.
    pub sdk_int: Option<u32>,
    pub chooser_title: String,
    /// Strategies to try, in order.
    pub strategies: Vec<Strategy>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            am_path: PathBuf::from(DEFAULT_AM_PATH),
            getprop_path: PathBuf::from(DEFAULT_GETPROP_PATH),
            sdk_int: None,
            chooser_title: DEFAULT_CHOOSER_TITLE.to_string(),
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

impl AppConfig {
    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::default()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = unquote(value.trim());
            let value = value.as_str();

            match key {
                "am_path" if !value.is_empty() => config.am_path = PathBuf::from(value),
                "getprop_path" if !value.is_empty() => {
                    config.getprop_path = PathBuf::from(value)
                }
                "sdk_int" => config.sdk_int = value.parse().ok(),
                "chooser_title" if !value.is_empty() => config.chooser_title = value.to_string(),
                "strategies" => {
                    let parsed: Vec<Strategy> = value
                        .split(',')
                        .filter_map(|part| Strategy::from_label(part.trim()))
                        .collect();
                    if !parsed.is_empty() {
                        config.strategies = parsed;
                    }
                }
                _ => {}
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# folder-opener configuration".to_string(),
            String::new(),
            format!("am_path = {}", quote(&self.am_path.display().to_string())),
            format!("getprop_path = {}", quote(&self.getprop_path.display().to_string())),
        ];
        match self.sdk_int {
            Some(sdk) => lines.push(format!("sdk_int = {sdk}")),
            None => lines.push("# sdk_int = 34".to_string()),
        }
        lines.push(format!("chooser_title = {}", quote(&self.chooser_title)));
        lines.push(String::new());
        lines.push("# Tried in order: view-folder, documents-ui, content-chooser".to_string());
        let labels: Vec<&str> = self.strategies.iter().map(|s| s.label()).collect();
        lines.push(format!("strategies = {}", labels.join(", ")));
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Wrap `s` in double quotes, escaping `\` and `"`.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Inverse of [`quote`].  Unquoted values are taken verbatim.
fn unquote(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
    else {
        return raw.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Return the config file path (`$XDG_CONFIG_HOME/folder-opener/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}
