//! Host settings for a portal session, read from the environment.

use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://rickandmortyapi.com/api";
pub const DEFAULT_PREFS_PATH: &str = "portal-prefs.json";

/// Host-side settings for a portal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Root of the catalog API, without a trailing slash.
    pub api_base_url: String,
    /// File backing the durable preference store.
    pub prefs_path: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                           |
    /// |-----------------------|-----------------------------------|
    /// | `PORTAL_API_BASE_URL` | `https://rickandmortyapi.com/api` |
    /// | `PORTAL_PREFS_PATH`   | `portal-prefs.json`               |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_base_url = lookup("PORTAL_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base_url);
        let prefs_path = lookup("PORTAL_PREFS_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.prefs_path);
        Self {
            api_base_url,
            prefs_path,
        }
    }
}
