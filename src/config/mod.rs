use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::generator::{CharClasses, PasswordOptions, DEFAULT_LENGTH};
use crate::imaging::DEFAULT_QUALITY;
use crate::json_format::DEFAULT_INDENT;
use crate::pomodoro::PomodoroSettings;

const APP_DIR: &str = "toolhub";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_ZONE: &str = "UTC";

/// Per-tool defaults from `config.json`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pomodoro: PomodoroSettings,
    pub json: JsonConfig,
    pub password: PasswordConfig,
    pub image: ImageConfig,
    pub datetime: DateTimeConfig,
    /// Where produced files are written; `~/Downloads` when unset.
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub indent: usize,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl PasswordConfig {
    pub fn options(&self) -> PasswordOptions {
        PasswordOptions {
            length: self.length,
            classes: CharClasses {
                uppercase: self.uppercase,
                lowercase: self.lowercase,
                digits: self.digits,
                symbols: self.symbols,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DateTimeConfig {
    /// IANA zone used for local-time notations.
    pub zone: String,
}

impl Default for DateTimeConfig {
    fn default() -> Self {
        Self {
            zone: DEFAULT_ZONE.to_string(),
        }
    }
}

/// Reads `$XDG_CONFIG_HOME/toolhub/config.json` (or `~/.config/...`).
/// A missing or unreadable file means defaults; a broken one is logged.
pub fn load_app_config() -> AppConfig {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_app_config_with(xdg.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let Some(path) = config_file_path(xdg_config_home, home) else {
        tracing::debug!("no config directory; using defaults");
        return AppConfig::default();
    };
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return AppConfig::default(),
        Err(err) => {
            tracing::warn!(?err, ?path, "config unreadable; using defaults");
            return AppConfig::default();
        }
    };
    serde_json::from_str(&contents).unwrap_or_else(|err| {
        tracing::warn!(%err, ?path, "config is not valid; using defaults");
        AppConfig::default()
    })
}

fn config_file_path(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let root = match xdg_config_home.filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => dir.to_path_buf(),
        None => home?.join(".config"),
    };
    Some(root.join(APP_DIR).join(APP_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(tag: &str, contents: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("toolhub-config-{tag}-{}", std::process::id()));
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).unwrap();
        root
    }

    #[test]
    fn xdg_dir_wins_over_home() {
        let path = config_file_path(Some(Path::new("/xdg")), Some(Path::new("/home/me")));
        assert_eq!(path, Some(PathBuf::from("/xdg/toolhub/config.json")));
    }

    #[test]
    fn blank_xdg_dir_uses_dot_config() {
        let path = config_file_path(Some(Path::new("")), Some(Path::new("/home/me")));
        assert_eq!(path, Some(PathBuf::from("/home/me/.config/toolhub/config.json")));
        assert_eq!(config_file_path(None, None), None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let root = std::env::temp_dir().join("toolhub-config-absent");
        let config = load_app_config_with(Some(&root), None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.datetime.zone, "UTC");
        assert_eq!(config.password.options(), PasswordOptions::default());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let root = write_config(
            "partial",
            r#"{
                "pomodoro": {"work_minutes": 45},
                "json": {"indent": 4},
                "password": {"symbols": false},
                "datetime": {"zone": "Asia/Tokyo"},
                "output_dir": "/srv/toolhub"
            }"#,
        );
        let config = load_app_config_with(Some(&root), None);
        std::fs::remove_dir_all(&root).unwrap();

        assert_eq!(config.pomodoro.work_minutes, 45);
        assert_eq!(config.pomodoro.short_break_minutes, 5);
        assert_eq!(config.json.indent, 4);
        assert!(!config.password.options().classes.symbols);
        assert_eq!(config.password.length, DEFAULT_LENGTH);
        assert_eq!(config.image.quality, DEFAULT_QUALITY);
        assert_eq!(config.datetime.zone, "Asia/Tokyo");
        assert_eq!(config.output_dir, Some(PathBuf::from("/srv/toolhub")));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let root = write_config("broken", "{ not json");
        let config = load_app_config_with(Some(&root), None);
        std::fs::remove_dir_all(&root).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
