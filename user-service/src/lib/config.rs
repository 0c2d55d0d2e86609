use std::env;

use auth::DEFAULT_TOKEN_TTL_HOURS;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    /// Account seeded into the store at startup, if any
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn default_expiration_hours() -> i64 {
    DEFAULT_TOKEN_TTL_HOURS
}

impl JwtConfig {
    /// Longest accepted session lifetime (one year).
    pub const MAX_EXPIRATION_HOURS: i64 = 24 * 366;

    /// Session lifetime as a duration.
    ///
    /// # Errors
    /// * `Message` - `expiration_hours` is not in `1..=MAX_EXPIRATION_HOURS`
    pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
        if !(1..=Self::MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                Self::MAX_EXPIRATION_HOURS,
                self.expiration_hours
            )));
        }

        Ok(Duration::hours(self.expiration_hours))
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// The signing secret has no default and must come from one of these sources.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::from_sources(&run_mode, Environment::default().separator("__"))
    }

    fn from_sources(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.token_ttl()?;

        Ok(config)
    }
}
