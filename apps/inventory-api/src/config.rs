use core_config::{AppInfo, FromEnv, app_info, env_optional, env_parse, server::ServerConfig};
use database::RetryConfig;
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    /// `None` when `DATABASE_URL` is unset; items are then kept in memory
    pub database: Option<PostgresConfig>,
    pub db_retry: RetryConfig,
    pub run_migrations: bool,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let database = match env_optional("DATABASE_URL") {
            Some(_) => Some(PostgresConfig::from_env()?),
            None => None,
        };

        Ok(Self {
            app: app_info!(),
            database,
            db_retry: RetryConfig::from_env()?,
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
            server,
            environment,
        })
    }
}
