use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "API for managing inventory items and per-category summaries"
    ),
    nest(
        (path = crate::api::ITEMS_PATH, api = domain_items::ApiDoc)
    )
)]
pub struct ApiDoc;
