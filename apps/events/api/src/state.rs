//! Application state management.
//!
//! Holds the configuration and the MongoDB handles built once at startup.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: the MongoDB client shares its connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, shut down after the server stops
    pub mongo_client: Client,
    /// The `event_db` database (or `MONGODB_DATABASE`)
    pub db: Database,
}
