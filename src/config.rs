use crate::constants::{
    APP_NAME, DEFAULT_ENDPOINT, DEFAULT_LOG_LEVEL, DEFAULT_REQUEST_TIMEOUT_SECS, ENDPOINT_ENV,
    FAILURE_MESSAGE, LOG_LEVEL_ENV, WELCOME_MESSAGE,
};
use crate::errors::{ChatError, ChatResult};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

/// Order in which bot replies are appended when submissions overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyOrder {
    /// Replies appear in the order their requests were sent.
    #[default]
    Submission,
    /// Replies appear as soon as they arrive.
    Arrival,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub greeting: String,
    pub failure_message: String,
    pub request_timeout_secs: u64,
    pub reply_order: ReplyOrder,
    pub strip_markup: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            greeting: WELCOME_MESSAGE.to_string(),
            failure_message: FAILURE_MESSAGE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            reply_order: ReplyOrder::default(),
            strip_markup: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies `CHATLINE_*` overrides from the environment (or a `.env` file).
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = dotenv::var(ENDPOINT_ENV) {
            self.endpoint = endpoint;
        }
        if let Ok(level) = dotenv::var(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
    }
}

/// Default location: `~/.config/chatline/config.json`.
pub fn config_path() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join(APP_NAME).join("config.json"))
}

/// Loads the config at `path`, writing the defaults there first if it does not exist.
pub fn load_or_create(path: &Path) -> ChatResult<Config> {
    if path.exists() {
        let config_str = fs::read_to_string(path)
            .map_err(|e| ChatError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ChatError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;
        return Ok(config);
    }

    let config = Config::default();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ChatError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(&config)
        .map_err(|e| ChatError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, config_str)
        .map_err(|e| ChatError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(config)
}

/// Loads the user's config and applies environment overrides.
pub fn load() -> ChatResult<Config> {
    let mut config = load_or_create(&config_path()?)?;
    config.apply_env_overrides();
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &Config) -> ChatResult<()> {
    if !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://")) {
        return Err(ChatError::config_error(format!(
            "Endpoint must be an http(s) URL, got '{}'",
            config.endpoint
        )));
    }

    if config.greeting.trim().is_empty() {
        return Err(ChatError::config_error("Greeting must not be empty"));
    }

    if config.failure_message.trim().is_empty() {
        return Err(ChatError::config_error("Failure message must not be empty"));
    }

    if config.request_timeout_secs == 0 {
        return Err(ChatError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    match config.log_level.as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => {}
        other => {
            return Err(ChatError::config_error(format!(
                "Unknown log level '{}'",
                other
            )))
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_endpoint() {
        let mut config = Config::default();
        config.endpoint = "127.0.0.1:5000/chat".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_timeout() {
        let mut config = Config::default();
        config.request_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_log_level() {
        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = load_or_create(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = load_or_create(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "endpoint": "https://bot.example.com/chat", "reply_order": "arrival" }"#,
        )
        .unwrap();

        let config = load_or_create(&path).unwrap();
        assert_eq!(config.endpoint, "https://bot.example.com/chat");
        assert_eq!(config.reply_order, ReplyOrder::Arrival);
        assert_eq!(config.greeting, WELCOME_MESSAGE);
        assert!(config.strip_markup);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "request_timeout_secs": 0 }"#).unwrap();
        assert!(matches!(load_or_create(&path), Err(ChatError::Config(_))));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_or_create(&path), Err(ChatError::Config(_))));
    }
}
