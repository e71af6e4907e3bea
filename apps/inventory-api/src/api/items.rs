use axum::Router;
use domain_items::{InMemoryItemRepository, ItemService, PgItemRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    match &state.db {
        Some(db) => handlers::router(ItemService::new(PgItemRepository::new(db.clone()))),
        None => {
            tracing::warn!("DATABASE_URL not set, items are kept in memory only");
            handlers::router(ItemService::new(InMemoryItemRepository::new()))
        }
    }
}
