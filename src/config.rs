use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub trello: TrelloConfig,
}

/// Connection settings for the Trello API. Read-only once the process has started.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TrelloConfig {
    pub base_url: Option<String>,
    pub key: Option<String>,
    pub token: Option<String>,
    pub board_id: Option<String>,
    pub default_list_id: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            key: None,
            token: None,
            board_id: None,
            default_list_id: None,
            connect_timeout_secs: 5,
            request_timeout_secs: 15,
        }
    }
}

impl TrelloConfig {
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn board_id(&self) -> Option<&str> {
        self.board_id.as_deref()
    }

    pub fn default_list_id(&self) -> Option<&str> {
        self.default_list_id.as_deref()
    }

    pub fn has_default_list_id(&self) -> bool {
        self.default_list_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    pub fn has_board_id(&self) -> bool {
        self.board_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Overlay `TRELLO_*` variables on top of the file values.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields: [(&str, &mut Option<String>); 5] = [
            ("TRELLO_BASE_URL", &mut self.base_url),
            ("TRELLO_API_KEY", &mut self.key),
            ("TRELLO_TOKEN", &mut self.token),
            ("TRELLO_BOARD_ID", &mut self.board_id),
            ("TRELLO_DEFAULT_LIST_ID", &mut self.default_list_id),
        ];
        for (var, slot) in fields {
            if let Some(value) = lookup(var) {
                *slot = Some(value);
            }
        }
    }
}

fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taskcard")
}

pub fn load_config() -> Result<AppConfig> {
    let mut config = load_config_from(&config_path())?;
    config
        .trello
        .apply_env_overrides(|var| std::env::var(var).ok());
    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_list(id: Option<&str>) -> TrelloConfig {
        TrelloConfig {
            default_list_id: id.map(String::from),
            ..TrelloConfig::default()
        }
    }

    #[test]
    fn default_list_requires_non_blank_value() {
        assert!(!with_list(None).has_default_list_id());
        assert!(!with_list(Some("")).has_default_list_id());
        assert!(!with_list(Some("   \t")).has_default_list_id());
        assert!(with_list(Some("list-1")).has_default_list_id());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.trello.base_url(), Some(DEFAULT_BASE_URL));
        assert_eq!(config.trello.key(), None);
        assert_eq!(config.trello.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn parses_trello_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[trello]
key = "k"
token = "t"
board_id = "b1"
default_list_id = "l1"
connect_timeout_secs = 2
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        let trello = config.trello;
        assert_eq!(trello.base_url(), Some(DEFAULT_BASE_URL));
        assert_eq!(trello.key(), Some("k"));
        assert_eq!(trello.token(), Some("t"));
        assert_eq!(trello.board_id(), Some("b1"));
        assert!(trello.has_default_list_id());
        assert_eq!(trello.connect_timeout(), Duration::from_secs(2));
        assert_eq!(trello.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[trello\nkey = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut trello = TrelloConfig {
            key: Some("file-key".into()),
            ..TrelloConfig::default()
        };
        let env: HashMap<&str, &str> = [
            ("TRELLO_API_KEY", "env-key"),
            ("TRELLO_DEFAULT_LIST_ID", "env-list"),
        ]
        .into_iter()
        .collect();

        trello.apply_env_overrides(|var| env.get(var).map(|v| v.to_string()));

        assert_eq!(trello.key(), Some("env-key"));
        assert_eq!(trello.default_list_id(), Some("env-list"));
        assert_eq!(trello.token(), None);
        assert_eq!(trello.base_url(), Some(DEFAULT_BASE_URL));
    }
}
