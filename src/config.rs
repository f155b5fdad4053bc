//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

/// Cookie holding the raw admin session token.
pub const SESSION_COOKIE: &str = "inv_session";

/// Cookie carrying a one-shot flash message across a redirect.
pub const FLASH_COOKIE: &str = "inv_flash";

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_DATABASE_URL: &str = "sqlite://data/invernadero.db?mode=rwc";
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_REPORTS_DIR: &str = "reportes";
    pub const DEV_SESSION_TTL_SECS: u64 = 28_800; // 8 hours
    pub const MAX_SESSION_TTL_SECS: u64 = 31_536_000; // 1 year
    pub const DEV_ADMIN_USERNAME: &str = "ADMIN";
    pub const DEV_ADMIN_PASSWORD: &str = "Admin123!";

    pub const DB_MAX_CONNECTIONS: u32 = 10;
    pub const DB_MIN_CONNECTIONS: u32 = 1;
    pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    pub const DB_MAX_LIFETIME_SECS: u64 = 3600;
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// SQLite connection URL (`sqlite://path?mode=rwc` or `sqlite::memory:`)
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Upper bound on how long a pooled connection is reused
    pub max_lifetime_secs: u64,
}

/// Credentials of the administrator seeded at startup.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database pool configuration
    pub database: DatabaseSettings,
    /// Directory where generated report files are written
    pub reports_dir: PathBuf,
    /// Lifetime of an admin session in seconds
    pub session_ttl_secs: u64,
    /// Administrator inserted on first start
    pub admin_seed: AdminSeed,
    /// Directory for static assets (optional)
    pub static_dir: Option<PathBuf>,
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: T,
    message: &'static str,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(message)),
        Err(_) => Ok(default),
    }
}

/// Session lifetimes above one year are rejected in every environment.
fn check_session_ttl(ttl_secs: u64) -> Result<(), ConfigError> {
    if ttl_secs > defaults::MAX_SESSION_TTL_SECS {
        return Err(ConfigError::InvalidValue(
            "INV_SESSION_TTL_SECS must not exceed 31536000 (one year)",
        ));
    }
    Ok(())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode every variable except `RUST_ENV` has a default.
    /// In production mode `DATABASE_URL` is required and the seeded admin
    /// password must not be the development default.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `INV_HOST`, `INV_PORT`: bind address (default: 127.0.0.1:8080)
    /// - `DATABASE_URL`: SQLite connection URL
    /// - `INV_DB_MAX_CONNECTIONS`, `INV_DB_MIN_CONNECTIONS`: pool bounds
    /// - `INV_DB_ACQUIRE_TIMEOUT_SECS`, `INV_DB_MAX_LIFETIME_SECS`: pool timeouts
    /// - `INV_REPORTS_DIR`: report output directory (default: reportes)
    /// - `INV_SESSION_TTL_SECS`: session lifetime (default: 8 hours, at most 1 year)
    /// - `INV_ADMIN_USERNAME`, `INV_ADMIN_PASSWORD`: seeded administrator
    /// - `INV_STATIC_DIR`: static assets directory
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = env::var("INV_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());
        let port = parse_var(
            "INV_PORT",
            defaults::DEV_PORT,
            "INV_PORT must be a valid port number",
        )?;

        let url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) if environment.is_production() => {
                return Err(ConfigError::MissingEnvVar("DATABASE_URL"));
            }
            Err(_) => defaults::DEV_DATABASE_URL.to_string(),
        };
        if !url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidValue(
                "DATABASE_URL must be a sqlite: connection URL",
            ));
        }

        let database = DatabaseSettings {
            url,
            max_connections: parse_var(
                "INV_DB_MAX_CONNECTIONS",
                defaults::DB_MAX_CONNECTIONS,
                "INV_DB_MAX_CONNECTIONS must be a valid number",
            )?,
            min_connections: parse_var(
                "INV_DB_MIN_CONNECTIONS",
                defaults::DB_MIN_CONNECTIONS,
                "INV_DB_MIN_CONNECTIONS must be a valid number",
            )?,
            acquire_timeout_secs: parse_var(
                "INV_DB_ACQUIRE_TIMEOUT_SECS",
                defaults::DB_ACQUIRE_TIMEOUT_SECS,
                "INV_DB_ACQUIRE_TIMEOUT_SECS must be a valid number",
            )?,
            max_lifetime_secs: parse_var(
                "INV_DB_MAX_LIFETIME_SECS",
                defaults::DB_MAX_LIFETIME_SECS,
                "INV_DB_MAX_LIFETIME_SECS must be a valid number",
            )?,
        };

        let reports_dir = PathBuf::from(
            env::var("INV_REPORTS_DIR").unwrap_or_else(|_| defaults::DEV_REPORTS_DIR.to_string()),
        );

        let session_ttl_secs = parse_var(
            "INV_SESSION_TTL_SECS",
            defaults::DEV_SESSION_TTL_SECS,
            "INV_SESSION_TTL_SECS must be a valid number",
        )?;
        check_session_ttl(session_ttl_secs)?;

        let admin_seed = AdminSeed {
            username: env::var("INV_ADMIN_USERNAME")
                .unwrap_or_else(|_| defaults::DEV_ADMIN_USERNAME.to_string()),
            password: SecretString::from(
                env::var("INV_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| defaults::DEV_ADMIN_PASSWORD.to_string()),
            ),
        };

        let static_dir = env::var("INV_STATIC_DIR").ok().map(PathBuf::from);

        let config = Config {
            environment,
            host,
            port,
            database,
            reports_dir,
            session_ttl_secs,
            admin_seed,
            static_dir,
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database.url == defaults::DEV_DATABASE_URL {
            errors.push(format!(
                "DATABASE_URL is using development default '{}'. Set a production database path.",
                defaults::DEV_DATABASE_URL
            ));
        }

        if self.admin_seed.password.expose_secret() == defaults::DEV_ADMIN_PASSWORD {
            errors.push(
                "INV_ADMIN_PASSWORD is using the development default. Set a secure password."
                    .to_string(),
            );
        }

        if self.session_ttl_secs == 0 {
            errors.push("INV_SESSION_TTL_SECS must be greater than zero.".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
