//! Application configuration. Listener, storage, AI credentials.

use crate::domain::DomainError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default HTTP port, matching the front end's expectations.
pub const DEFAULT_PORT: u16 = 3001;

/// Default bound on one AI request, in seconds.
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Which `PlanStore` adapter to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Json,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Listen address. Read from UNIFIT_BIND.
    #[serde(default)]
    pub bind: Option<String>,

    /// Listen port. Read from UNIFIT_PORT, or PORT.
    #[serde(default)]
    pub port: Option<u16>,

    /// Directory for plan storage. Read from UNIFIT_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Plan store backend: "sqlite" (default) or "json". Read from UNIFIT_STORE.
    #[serde(default)]
    pub store: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // AI Generation Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// AI API key (e.g., OpenAI). Read from UNIFIT_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// AI API URL. Defaults to OpenAI. Read from UNIFIT_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// AI model name. Defaults to "gpt-4o-mini". Read from UNIFIT_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Timeout for one AI request in seconds (default 30). Read from UNIFIT_AI_TIMEOUT_SECS.
    #[serde(default)]
    pub ai_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("UNIFIT"));
        if let Ok(path) = std::env::var("UNIFIT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // PORT is read directly (no prefix) so hosting platforms can inject it
        if cfg.port.is_none() {
            if let Ok(s) = std::env::var("PORT") {
                if let Ok(port) = s.parse::<u16>() {
                    cfg.port = Some(port);
                }
            }
        }
        Ok(cfg)
    }

    pub fn bind_or_default(&self) -> String {
        self.bind.clone().unwrap_or_else(|| "0.0.0.0".to_string())
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("./data"))
    }

    /// Parse the configured store backend. Unknown names are a configuration error.
    pub fn store_backend(&self) -> Result<StoreBackend, DomainError> {
        match self.store.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("sqlite") => Ok(StoreBackend::Sqlite),
            Some("json") => Ok(StoreBackend::Json),
            Some(other) => Err(DomainError::Config(format!(
                "unknown store backend {other:?} (expected \"sqlite\" or \"json\")"
            ))),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the AI API key if configured and non-empty.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key.clone().filter(|k| !k.trim().is_empty())
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    /// Returns the AI model name. Defaults to "gpt-4o-mini".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs.unwrap_or(DEFAULT_AI_TIMEOUT_SECS))
    }

    /// Returns true if AI is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }
}
