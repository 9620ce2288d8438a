//! Mock server settings, read from the environment with `.env` support in the binary.

/// Mock server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Size of the generated character set (default: `826`, the size of the
    /// public dataset).
    pub character_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            character_count: 826,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default     |
    /// |------------------------|-------------|
    /// | `HOST`                 | `127.0.0.1` |
    /// | `PORT`                 | `3000`      |
    /// | `MOCK_CHARACTER_COUNT` | `826`       |
    ///
    /// Values that fail to parse fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port),
            character_count: parse_var("MOCK_CHARACTER_COUNT", defaults.character_count),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {key} value {raw:?}, using default: {default}");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_joins_host_and_port() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            character_count: 10,
        };
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn default_matches_public_dataset_size() {
        assert_eq!(ServerConfig::default().character_count, 826);
    }
}
