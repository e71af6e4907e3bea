//! Application state management.
//!
//! The state is built once at startup and holds:
//! - Configuration
//! - The PostgreSQL connection pool, when one is configured

/// Shared application state.
///
/// Cloning is cheap: the connection pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool; `None` runs on the in-memory store
    pub db: Option<database::postgres::DatabaseConnection>,
}
