//! Application configuration management.
//!
//! This module handles loading and saving the client configuration, which
//! includes the API base URL and the last used username.
//!
//! Configuration is stored at `~/.config/emisdesk/config.json`. The
//! envelope-encryption secret and the base URL can be overridden through
//! `EMISDESK_AUTH_SECRET` and `EMISDESK_API_BASE_URL`.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "emisdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Session envelope file name
const COOKIE_FILE: &str = "session_cookie.json";

/// Default backend location (a local Django development server).
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Built-in fallback secret. Using it is logged loudly: it only obfuscates
/// the envelope, it does not protect it.
const DEFAULT_AUTH_SECRET: &str = "emisdesk-unconfigured-secret";

/// Environment variable naming the envelope-encryption secret.
pub const AUTH_SECRET_ENV: &str = "EMISDESK_AUTH_SECRET";

/// Environment variable overriding the API base URL.
pub const API_BASE_URL_ENV: &str = "EMISDESK_API_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Where the session envelope lives.
    pub fn cookie_path(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join(COOKIE_FILE))
    }

    /// Effective base URL: environment override, then config file, then the
    /// built-in default.
    pub fn api_base_url(&self) -> String {
        env::var(API_BASE_URL_ENV)
            .ok()
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// Envelope-encryption secret. Falls back to a built-in string when
    /// unconfigured, which is only obfuscation - hence the warning.
    pub fn auth_secret(&self) -> String {
        env::var(AUTH_SECRET_ENV).unwrap_or_else(|_| {
            warn!(
                "{} is not set; falling back to the built-in secret. \
                 Session envelopes are only obfuscated, not protected.",
                AUTH_SECRET_ENV
            );
            DEFAULT_AUTH_SECRET.to_string()
        })
    }

    /// True when the backend is reached over a secure transport; recorded on
    /// the session envelope as its `secure` attribute.
    pub fn is_secure_transport(&self) -> bool {
        self.api_base_url().starts_with("https://")
    }
}
