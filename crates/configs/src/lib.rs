use std::path::Path;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Apply pending migrations when the server boots
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

/// External song-detail API used to fill release date, lyrics and link on create.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default)]
    pub api_url: String,
    #[serde(default = "default_enrichment_timeout")]
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { api_url: String::new(), timeout_secs: default_enrichment_timeout() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_enrichment_timeout() -> u64 { 10 }
fn default_true() -> bool { true }

/// First non-empty value among `keys`.
fn first_env(lookup: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| lookup(k))
        .find(|v| !v.trim().is_empty())
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

pub fn parse_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`) when present, otherwise build from
    /// the environment; then normalize and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            Self::from_env()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Defaults overlaid with environment values. `lookup` resolves a variable name.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(host) = first_env(&lookup, &["SERVER_HOST"]) {
            cfg.server.host = host;
        }
        if let Some(port) = first_env(&lookup, &["SERVER_PORT", "PORT"]).and_then(|p| p.trim().parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = first_env(&lookup, &["TOKIO_WORKER_THREADS"]).and_then(|v| v.trim().parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Some(fmt) = first_env(&lookup, &["LOG_FORMAT"]) {
            if fmt.eq_ignore_ascii_case("json") {
                cfg.logging.format = LogFormat::Json;
            }
        }
        cfg.fill_from_env_with(&lookup);
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_and_validate_with(|k| std::env::var(k).ok())
    }

    pub fn normalize_and_validate_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        self.server.normalize()?;
        // URLs missing from the file may still come from the environment
        self.fill_from_env_with(&lookup);
        self.database.validate()?;
        self.enrichment.validate()?;
        Ok(())
    }

    fn fill_from_env_with(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if self.database.url.trim().is_empty() {
            if let Some(url) = first_env(lookup, &["DATABASE_URL", "DSN"]) {
                self.database.url = url;
            }
        }
        if self.enrichment.api_url.trim().is_empty() {
            if let Some(url) = first_env(lookup, &["ENRICHMENT_API_URL", "API_URL"]) {
                self.enrichment.api_url = url;
            }
        }
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl EnrichmentConfig {
    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(anyhow!("enrichment.api_url is empty; set it in config.toml or API_URL"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!("enrichment.api_url must start with http(s)"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("enrichment.timeout_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn parses_full_file() {
        let cfg = parse_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://u:p@localhost/songs"
            max_connections = 5

            [enrichment]
            api_url = "http://localhost:9999/info"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 2);
        assert!(cfg.database.run_migrations);
        assert_eq!(cfg.enrichment.timeout_secs, 10);
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn env_fills_missing_urls_only() {
        let mut cfg = parse_str(
            r#"
            [database]
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate_with(env(&[
            ("DATABASE_URL", "postgres://ignored"),
            ("API_URL", "https://api.example.com/info"),
        ]))
        .unwrap();
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.enrichment.api_url, "https://api.example.com/info");
    }

    #[test]
    fn from_env_accepts_legacy_names() {
        let cfg = AppConfig::from_env_with(env(&[
            ("DSN", "postgres://u:p@db/songs"),
            ("PORT", "8085"),
            ("API_URL", "http://enrich/info"),
        ]));
        assert_eq!(cfg.database.url, "postgres://u:p@db/songs");
        assert_eq!(cfg.server.port, 8085);
        assert_eq!(cfg.enrichment.api_url, "http://enrich/info");
    }

    #[test]
    fn rejects_unknown_database_scheme() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "mysql://localhost".into();
        cfg.enrichment.api_url = "http://enrich/info".into();
        assert!(cfg.normalize_and_validate_with(env(&[])).is_err());
    }

    #[test]
    fn rejects_missing_enrichment_url() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "sqlite::memory:".into();
        let err = cfg.normalize_and_validate_with(env(&[])).unwrap_err();
        assert!(err.to_string().contains("enrichment.api_url"));
    }

    #[test]
    fn zero_worker_threads_fall_back() {
        let mut cfg = AppConfig::default();
        cfg.server.worker_threads = Some(0);
        cfg.database.url = "sqlite::memory:".into();
        cfg.enrichment.api_url = "http://enrich/info".into();
        cfg.normalize_and_validate_with(env(&[])).unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
    }
}
