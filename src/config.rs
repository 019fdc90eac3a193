use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::link::DEFAULT_PUBLIC_BASE_URL;
use crate::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "igotyou";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_MODEL: &str = "IGOTYOU_MODEL";
const ENV_OPENAI_BASE_URL: &str = "IGOTYOU_OPENAI_BASE_URL";
const ENV_PUBLIC_BASE_URL: &str = "IGOTYOU_BASE_URL";

/// Settings after file values and environment overrides are combined.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub public_base_url: String,
    pub config_dir: PathBuf,
}

/// What `config init` writes to disk. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("could not determine the config directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Ok(Self::resolve(stored, config_directory()?, |key| {
            env::var(key).ok()
        }))
    }

    /// Environment values win over stored ones; blanks count as unset.
    pub fn resolve(
        stored: StoredConfig,
        config_dir: PathBuf,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |key: &str, stored: Option<String>| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .or(stored.filter(|v| !v.trim().is_empty()))
        };

        Self {
            openai_api_key: pick(ENV_API_KEY, stored.openai_api_key),
            openai_model: pick(ENV_MODEL, stored.openai_model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: pick(ENV_OPENAI_BASE_URL, stored.openai_base_url)
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            public_base_url: pick(ENV_PUBLIC_BASE_URL, stored.public_base_url)
                .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
            config_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::resolve(StoredConfig::default(), PathBuf::from("/tmp/x"), |_| None);
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.openai_model, DEFAULT_MODEL);
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.public_base_url, DEFAULT_PUBLIC_BASE_URL);
    }

    #[test]
    fn environment_overrides_stored_values() {
        let stored = StoredConfig {
            openai_api_key: Some("sk-stored".to_string()),
            openai_model: Some("gpt-4o-mini".to_string()),
            openai_base_url: None,
            public_base_url: Some("https://petitions.example".to_string()),
        };
        let env: HashMap<&str, &str> =
            HashMap::from([("OPENAI_API_KEY", "sk-env"), ("IGOTYOU_BASE_URL", "  ")]);

        let config = AppConfig::resolve(stored, PathBuf::from("/tmp/x"), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.openai_api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.public_base_url, "https://petitions.example");
    }

    #[test]
    fn stored_config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        assert_eq!(StoredConfig::load_from(&path).unwrap(), StoredConfig::default());

        let stored = StoredConfig {
            openai_model: Some("gpt-4o".to_string()),
            ..StoredConfig::default()
        };
        stored.save_to(&path).unwrap();
        assert_eq!(StoredConfig::load_from(&path).unwrap(), stored);
    }

    #[test]
    fn corrupt_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            StoredConfig::load_from(&path),
            Err(AppError::Configuration(_))
        ));
    }
}
