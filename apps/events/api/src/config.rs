use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    /// Loads `.env` from the working directory (if any), then reads the
    /// environment. Variables already set take precedence over the file.
    pub fn load() -> eyre::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?; // Defaults to mongodb://localhost:27017, db event_db
        let server = ServerConfig::from_env()?; // Defaults: HOST=0.0.0.0, PORT=3000

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
        })
    }
}
