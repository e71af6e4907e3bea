//! Application-specific readiness check.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Readiness check endpoint that verifies the database connection.
///
/// Without a configured database the in-memory store is always reported as
/// connected.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let database: HealthCheckFuture<'_> = Box::pin(async {
        match &state.db {
            Some(db) => database::postgres::check_health(db)
                .await
                .map_err(|e| format!("Database health check failed: {}", e)),
            None => Ok(()),
        }
    });

    run_health_checks(vec![("database", database)])
        .await
        .into_response()
}
