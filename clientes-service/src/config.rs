//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: `CLIENTES_`, nested keys joined by `__`,
//!    e.g. `CLIENTES_DATABASE__URL`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/clientes-service/config.toml
//! 4. System directory: /etc/clientes-service/config.toml
//! 5. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

const APP_NAME: &str = "clientes-service";
const ENV_PREFIX: &str = "CLIENTES_";

/// Complete service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub jwt: JwtConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub middleware: MiddlewareConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Service identity and HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// `EnvFilter` directive, e.g. `info` or `clientes_service=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// `dev` gets human-readable logs, anything else JSON
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            port: default_port(),
            log_level: default_log_level(),
            timeout_secs: default_timeout(),
            environment: default_environment(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_dev(&self) -> bool {
        self.environment.eq_ignore_ascii_case("dev")
    }
}

/// Bearer token verification settings
///
/// HMAC algorithms take the key from `secret`, or from the raw bytes of
/// `key_path`. RSA/EC algorithms require a PEM public key at `key_path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,

    #[serde(default)]
    pub key_path: Option<PathBuf>,

    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,

    #[serde(default)]
    pub issuer: Option<String>,

    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            key_path: None,
            algorithm: default_jwt_algorithm(),
            issuer: None,
            audience: None,
        }
    }
}

/// PostgreSQL settings. Without a `url` customers are kept in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_secs: default_connection_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// `permissive`, `restrictive` or `disabled`
    #[serde(default = "default_cors_mode")]
    pub cors_mode: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            cors_mode: default_cors_mode(),
        }
    }
}

/// Field constraints applied to customer payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_name_max_length")]
    pub name_max_length: u64,

    #[serde(default = "default_email_max_length")]
    pub email_max_length: u64,

    #[serde(default)]
    pub phone_required: bool,

    #[serde(default = "default_phone_max_length")]
    pub phone_max_length: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_max_length: default_name_max_length(),
            email_max_length: default_email_max_length(),
            phone_required: false,
            phone_max_length: default_phone_max_length(),
        }
    }
}

fn default_service_name() -> String {
    APP_NAME.to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    2
}

fn default_body_limit_mb() -> usize {
    1
}

fn default_cors_mode() -> String {
    "permissive".to_string()
}

fn default_name_max_length() -> u64 {
    100
}

// RFC 5321 path limit
fn default_email_max_length() -> u64 {
    254
}

fn default_phone_max_length() -> u64 {
    20
}

impl Config {
    /// Load configuration from the standard search path
    pub fn load() -> Result<Self> {
        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so later files override earlier ones
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring environment overrides
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }

    /// Config file locations, highest priority first
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME);
        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc").join(APP_NAME).join("config.toml"));
        paths
    }

    /// Database URL, if one is configured
    pub fn database_url(&self) -> Option<&str> {
        self.database.url.as_deref().filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.name, "clientes-service");
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.jwt.algorithm, "HS256");
        assert!(config.database_url().is_none());
        assert!(!config.validation.phone_required);
        assert!(config.service.is_dev());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[service]
port = 9191
environment = "production"

[database]
url = "postgres://app:secret@db/clientes"
max_connections = 4

[validation]
phone_required = true
"#
        )
        .unwrap();

        let config = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.service.port, 9191);
        assert!(!config.service.is_dev());
        assert_eq!(
            config.database_url(),
            Some("postgres://app:secret@db/clientes")
        );
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.min_connections, 1);
        assert!(config.validation.phone_required);
        assert_eq!(config.validation.name_max_length, 100);
    }

    #[test]
    fn test_empty_database_url_means_memory() {
        let mut config = Config::default();
        config.database.url = Some(String::new());
        assert!(config.database_url().is_none());
    }
}
