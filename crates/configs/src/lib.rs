use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub encryption: EncryptionConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
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
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Bearer token settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_hours: default_token_ttl_hours() }
    }
}

fn default_token_ttl_hours() -> i64 { 10 }

/// Key for the PII column cipher. Must be exactly 32 bytes.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EncryptionConfig {
    #[serde(default)]
    pub key: String,
}

/// Admin account created at startup when absent.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub admin_username: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { format: default_log_format() } }
}

fn default_log_format() -> String { "compact".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if std::path::Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay environment variables on top of file values.
    pub fn apply_env(&mut self) {
        if let Some(host) = env_non_empty("SERVER_HOST") { self.server.host = host; }
        if let Some(port) = env_non_empty("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = env_non_empty("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        self.database.normalize_from_env();
        if let Some(secret) = env_non_empty("JWT_SECRET") { self.auth.jwt_secret = secret; }
        if let Some(ttl) = env_non_empty("TOKEN_TTL_HOURS").and_then(|v| v.parse::<i64>().ok()) {
            self.auth.token_ttl_hours = ttl;
        }
        if let Some(key) = env_non_empty("FIELD_ENCRYPTION_KEY") { self.encryption.key = key; }
        if let Some(u) = env_non_empty("ADMIN_USERNAME") { self.bootstrap.admin_username = Some(u); }
        if let Some(p) = env_non_empty("ADMIN_PASSWORD") { self.bootstrap.admin_password = Some(p); }
        if let Some(f) = env_non_empty("LOG_FORMAT") { self.logging.format = f; }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.encryption.validate()?;
        self.bootstrap.validate()?;
        Ok(())
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
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if let Some(url) = env_non_empty("DATABASE_URL") {
            self.url = url;
        }
    }

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

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty; set it in config.toml or JWT_SECRET"));
        }
        if self.token_ttl_hours < 1 {
            return Err(anyhow!("auth.token_ttl_hours must be >= 1"));
        }
        Ok(())
    }
}

impl EncryptionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.key.len() != 32 {
            return Err(anyhow!("encryption.key must be exactly 32 bytes (got {})", self.key.len()));
        }
        Ok(())
    }
}

impl BootstrapConfig {
    pub fn validate(&self) -> Result<()> {
        match (&self.admin_username, &self.admin_password) {
            (Some(_), None) => Err(anyhow!("bootstrap.admin_password is required when admin_username is set")),
            (Some(u), Some(_)) if u.trim().is_empty() => Err(anyhow!("bootstrap.admin_username is blank")),
            _ => Ok(()),
        }
    }

    /// Both credentials, when bootstrap is enabled.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(u), Some(p)) => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        [server]
        host = "0.0.0.0"
        port = 9090

        [database]
        url = "sqlite::memory:"
        min_connections = 1

        [auth]
        jwt_secret = "unit-test-secret"

        [encryption]
        key = "0123456789abcdef0123456789abcdef"

        [bootstrap]
        admin_username = "admin"
        admin_password = "admin-pass"
    "#;

    #[test]
    fn parses_and_validates_full_file() {
        let mut cfg = load_from_str(VALID).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.auth.token_ttl_hours, 10);
        assert_eq!(cfg.logging.format, "compact");
        assert_eq!(cfg.bootstrap.admin_credentials(), Some(("admin", "admin-pass")));
    }

    #[test]
    fn rejects_short_encryption_key() {
        let mut cfg = load_from_str(VALID).unwrap();
        cfg.encryption.key = "too-short".into();
        let err = cfg.normalize_and_validate().unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }

    #[test]
    fn rejects_missing_jwt_secret() {
        let mut cfg = load_from_str(VALID).unwrap();
        cfg.auth.jwt_secret = "  ".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_unknown_database_scheme() {
        let mut cfg = load_from_str(VALID).unwrap();
        cfg.database.url = "mysql://localhost/rental".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn bootstrap_requires_password_with_username() {
        let b = BootstrapConfig { admin_username: Some("admin".into()), admin_password: None };
        assert!(b.validate().is_err());
        assert!(BootstrapConfig::default().validate().is_ok());
    }
}
