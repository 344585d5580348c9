//! Configuration management for the R4C robot factory
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with R4C_ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::Language;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Language of reports and customer emails
    #[serde(default)]
    pub language: Language,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Serial code pool configuration
    pub serials: SerialsConfig,

    /// Weekly report configuration
    pub reports: ReportsConfig,

    /// Outgoing email configuration
    pub email: EmailConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SerialsConfig {
    /// Text file holding the unused serial codes
    pub file_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    /// Directory where weekly production workbooks are stored
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    /// Sender address for customer notifications
    pub admin_address: String,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port
    pub smtp_port: u16,

    /// Upgrade the SMTP connection with STARTTLS
    pub smtp_starttls: bool,

    /// SMTP username, if the relay requires authentication
    pub smtp_username: Option<String>,

    /// SMTP password
    pub smtp_password: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("R4C_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("language", "ru")?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("serials.file_path", "serial_codes.txt")?
            .set_default("reports.directory", "reports/weekly_production")?
            .set_default("email.smtp_host", "localhost")?
            .set_default("email.smtp_port", 25)?
            .set_default("email.smtp_starttls", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (R4C_ prefix)
            .add_source(
                Environment::with_prefix("R4C")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}
