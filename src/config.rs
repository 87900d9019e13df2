// src/config.rs

//! Service configuration read from environment variables.

/// Runtime settings.
///
/// - `DATABASE_URL`: PostgreSQL connection string. When unset the service
///   keeps its inventory in memory.
/// - `HOST` / `PORT`: bind address (default `127.0.0.1:8080`).
/// - `RUST_LOG`: tracing filter directive (default `info`).
/// - `DB_MAX_CONNECTIONS`: pool size (default 5).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.max_connections),
        }
    }

    /// Returns the `"host:port"` bind address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            max_connections: 5,
        }
    }
}
