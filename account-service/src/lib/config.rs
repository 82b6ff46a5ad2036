use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// HS256 keys shorter than the 256-bit digest are rejected at startup.
pub const MIN_SECRET_BYTES: usize = 32;

/// Application configuration for account-service.
///
/// Read once at startup and handed to components explicitly.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

/// Document store connection.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// Token lifetime is fixed by the `auth` crate and is not configurable.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (port 5000, 5 pooled connections)
    ///
    /// # Errors
    /// * `ConfigError` - A source failed to parse, a key is missing, or the JWT
    ///   secret is empty or shorter than [`MIN_SECRET_BYTES`]
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 5000)?
            .set_default("database.max_connections", 5)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }

        if self.jwt.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes for HS256",
                MIN_SECRET_BYTES
            )));
        }

        Ok(())
    }
}
