use crate::error::{Result, SonosubError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub soniox_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    /// Override the Soniox API base URL.
    pub api_base: Option<String>,
    /// Directory for persisted transcript records.
    pub data_dir: Option<PathBuf>,
    /// Language hints sent on transcription submit.
    pub language_hints: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            soniox_api_key: None,
            gemini_api_key: None,
            api_base: None,
            data_dir: None,
            language_hints: vec!["en".to_string(), "es".to_string()],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                if let Ok(file_config) = toml::from_str::<Config>(&contents) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables
        if let Ok(key) = std::env::var("SONIOX_API_KEY") {
            config.soniox_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.gemini_api_key = Some(key);
        }
        if let Ok(base) = std::env::var("SONOSUB_API_BASE") {
            config.api_base = Some(base);
        }
        if let Ok(dir) = std::env::var("SONOSUB_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Check that the keys required for this run are present.
    pub fn validate(&self, needs_translation: bool) -> Result<()> {
        if self.soniox_api_key.is_none() {
            return Err(SonosubError::Config(
                "SONIOX_API_KEY not set. Export it with: export SONIOX_API_KEY=...".to_string(),
            ));
        }

        if needs_translation && self.gemini_api_key.is_none() {
            return Err(SonosubError::Config(
                "GEMINI_API_KEY not set. Get one at https://aistudio.google.com/apikey"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Directory where transcript records are stored.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("sonosub")
        })
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sonosub").join("config.toml"))
    }
}
