use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, ErrorResponse, JsonBody, ValidatedJson,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
        ValidationErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::Operation;
use crate::models::{CategorySummary, CreateItem, Item, UpdateItem};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI tag for item endpoints
pub const TAG: &str = "items";

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_item,
        get_category_summary,
        get_item,
        update_item,
        delete_item,
    ),
    components(
        schemas(Item, CreateItem, UpdateItem, CategorySummary, ErrorResponse),
        responses(
            BadRequestResponse,
            ValidationErrorResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Inventory item endpoints")
    )
)]
pub struct ApiDoc;

/// Create the item router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/summary", get(get_category_summary))
        .route(
            "/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .with_state(shared_service)
}

/// Item id taken from the `{id}` path segment
///
/// Any segment that is not a signed 64-bit integer is rejected with
/// `400 {"error": "invalid item ID"}`. Zero and negative ids are accepted
/// here and left to the service.
pub struct ItemId(pub i64);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("invalid item ID".to_string()))?;

        raw.parse::<i64>()
            .map(ItemId)
            .map_err(|_| AppError::BadRequest("invalid item ID".to_string()))
    }
}

/// List all items
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of items", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> Result<Json<Vec<Item>>, AppError> {
    let items = service
        .get_all_items()
        .await
        .map_err(|e| e.into_app_error(Operation::List))?;
    Ok(Json(items))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = service
        .create_item(input)
        .await
        .map_err(|e| e.into_app_error(Operation::Create))?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Item counts per category
#[utoipa::path(
    get,
    path = "/summary",
    tag = TAG,
    responses(
        (status = 200, description = "Per-category item counts", body = CategorySummary),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category_summary<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> Result<Json<CategorySummary>, AppError> {
    let summary = service
        .get_category_summary()
        .await
        .map_err(|e| e.into_app_error(Operation::Summary))?;
    Ok(Json(summary))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ItemId(id): ItemId,
) -> Result<Json<Item>, AppError> {
    let item = service
        .get_item_by_id(id)
        .await
        .map_err(|e| e.into_app_error(Operation::Get))?;
    Ok(Json(item))
}

/// Partially update an item
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ItemId(id): ItemId,
    JsonBody(input): JsonBody<UpdateItem>,
) -> Result<Json<Item>, AppError> {
    let item = service
        .update_item(id, input)
        .await
        .map_err(|e| e.into_app_error(Operation::Update))?;
    Ok(Json(item))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted successfully"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ItemId(id): ItemId,
) -> Result<StatusCode, AppError> {
    service
        .delete_item(id)
        .await
        .map_err(|e| e.into_app_error(Operation::Delete))?;
    Ok(StatusCode::NO_CONTENT)
}
