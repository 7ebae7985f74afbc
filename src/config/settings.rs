//! User settings for Outlay
//!
//! The settings file carries the remote store endpoint and credentials, the
//! AI endpoint and model, and display preferences. Credentials can also be
//! supplied through environment variables, which take precedence over the
//! file so tokens never have to be written to disk.

use serde::{Deserialize, Serialize};

use super::paths::OutlayPaths;
use crate::error::OutlayError;
use crate::models::UserId;

/// An authenticated user session: who owns the data and the bearer
/// credential presented to the remote store and AI proxy.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub access_token: String,
}

impl Session {
    /// An ephemeral session for running against the in-memory store, where
    /// no credential is needed.
    pub fn local() -> Self {
        Self {
            user_id: UserId::new(),
            access_token: String::new(),
        }
    }
}

/// User settings for Outlay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the remote store, e.g. "https://abc.example.co".
    /// Empty means no remote store is configured and the in-memory store
    /// is used instead.
    #[serde(default)]
    pub store_url: String,

    /// API key sent with every store request
    #[serde(default)]
    pub store_api_key: String,

    /// Bearer access token for the session user
    #[serde(default)]
    pub access_token: String,

    /// The session user's identifier
    #[serde(default)]
    pub user_id: Option<UserId>,

    /// Base URL of the OpenAI-compatible AI endpoint (up to and excluding
    /// "/chat/completions")
    #[serde(default)]
    pub ai_url: String,

    /// API key for the AI endpoint
    #[serde(default)]
    pub ai_api_key: String,

    /// Model identifier requested from the AI endpoint
    #[serde(default = "default_ai_model")]
    pub ai_model: String,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_ai_model() -> String {
    "google/gemini-3-flash-preview".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            store_url: String::new(),
            store_api_key: String::new(),
            access_token: String::new(),
            user_id: None,
            ai_url: String::new(),
            ai_api_key: String::new(),
            ai_model: default_ai_model(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if the file
    /// doesn't exist
    pub fn load_or_create(paths: &OutlayPaths) -> Result<Self, OutlayError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| OutlayError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| OutlayError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &OutlayPaths) -> Result<(), OutlayError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| OutlayError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| OutlayError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Overlay environment variables onto the file-based settings.
    ///
    /// Recognized: `OUTLAY_STORE_URL`, `OUTLAY_STORE_API_KEY`,
    /// `OUTLAY_ACCESS_TOKEN`, `OUTLAY_USER_ID`, `OUTLAY_AI_URL`,
    /// `OUTLAY_AI_API_KEY`, `OUTLAY_AI_MODEL`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("OUTLAY_STORE_URL") {
            self.store_url = v;
        }
        if let Ok(v) = std::env::var("OUTLAY_STORE_API_KEY") {
            self.store_api_key = v;
        }
        if let Ok(v) = std::env::var("OUTLAY_ACCESS_TOKEN") {
            self.access_token = v;
        }
        if let Ok(v) = std::env::var("OUTLAY_USER_ID") {
            match v.parse() {
                Ok(id) => self.user_id = Some(id),
                Err(_) => tracing::warn!("ignoring malformed OUTLAY_USER_ID"),
            }
        }
        if let Ok(v) = std::env::var("OUTLAY_AI_URL") {
            self.ai_url = v;
        }
        if let Ok(v) = std::env::var("OUTLAY_AI_API_KEY") {
            self.ai_api_key = v;
        }
        if let Ok(v) = std::env::var("OUTLAY_AI_MODEL") {
            self.ai_model = v;
        }
    }

    /// Whether a remote store endpoint is configured
    pub fn has_remote_store(&self) -> bool {
        !self.store_url.trim().is_empty()
    }

    /// The configured session, if any
    pub fn session(&self) -> Option<Session> {
        self.user_id.map(|user_id| Session {
            user_id,
            access_token: self.access_token.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.has_remote_store());
        assert!(settings.session().is_none());
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.ai_model, "google/gemini-3-flash-preview");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.store_url = "https://store.example.com".into();
        settings.user_id = Some(UserId::new());

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.store_url, "https://store.example.com");
        assert_eq!(loaded.user_id, settings.user_id);
        assert!(loaded.has_remote_store());
        assert!(loaded.session().is_some());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert!(!settings.has_remote_store());
    }

    #[test]
    fn test_serde_tolerates_missing_fields() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }
}
