use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::session::FileSessionPersistence;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub session: SessionSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SessionSettings {
    /// Defaults to `~/.config/replydesk/session.json`
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthSettings {
    pub min_password_length: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: "http://localhost:8000/api".to_string(),
                timeout_secs: 30,
            },
            session: SessionSettings::default(),
            auth: AuthSettings {
                min_password_length: 6,
            },
        }
    }
}

impl ClientConfig {
    /// Load `~/.config/replydesk/client.toml` (if present) with
    /// `REPLYDESK_*` environment overrides, e.g. `REPLYDESK_API__BASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&default_config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let defaults = ClientConfig::default();

        let config = Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs as i64)?
            .set_default(
                "auth.min_password_length",
                defaults.auth.min_password_length as i64,
            )?
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("REPLYDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: ClientConfig = config.try_deserialize()?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Write a commented default file unless one exists. Returns its path.
    pub fn write_default(path: &Path) -> Result<PathBuf, ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !path.exists() {
            let defaults = ClientConfig::default();
            let content = format!(
                r#"[api]
base_url = "{}"
timeout_secs = {}

[session]
# path = "{}"

[auth]
min_password_length = {}
"#,
                defaults.api.base_url,
                defaults.api.timeout_secs,
                FileSessionPersistence::default_path().display(),
                defaults.auth.min_password_length,
            );
            std::fs::write(path, content).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        Ok(path.to_path_buf())
    }

    pub fn session_path(&self) -> PathBuf {
        self.session
            .path
            .clone()
            .unwrap_or_else(FileSessionPersistence::default_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        dir.join("replydesk").join("client.toml")
    } else {
        PathBuf::from("./replydesk.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ClientConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.auth.min_password_length, 6);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://replies.example.com/api/"
timeout_secs = 5

[session]
path = "/tmp/replydesk-test-session.json"
"#,
        )
        .unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://replies.example.com/api");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(
            config.session_path(),
            PathBuf::from("/tmp/replydesk-test-session.json")
        );
    }

    #[test]
    fn test_write_default_is_loadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("client.toml");
        ClientConfig::write_default(&path).unwrap();
        assert!(path.exists());

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }
}
