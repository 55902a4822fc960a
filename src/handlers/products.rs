use super::{created_response, no_content_response, success_response, validate_input};
use crate::{errors::ServiceError, services::products::ProductInput, AppState};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

/// Creates the router for product and bill-of-materials endpoints
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/by-description/:description", get(get_product_by_description))
        .route("/:id", get(get_product).delete(delete_product))
        .route("/:id/bom", get(list_bom).post(associate_material))
        .route("/:id/bom/:material_description", delete(disassociate_material))
}

// Request DTOs

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssociateMaterialRequest {
    #[validate(length(min = 1, message = "material_description is required"))]
    pub material_description: String,
    #[validate(range(min = 1, message = "quantity_required must be greater than zero"))]
    pub quantity_required: i64,
}

// Handlers

async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&payload)?;
    let product = state
        .products
        .create_product(ProductInput {
            description: payload.description,
        })
        .await?;
    Ok(created_response(product))
}

async fn list_products(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let products = state.products.list_products().await?;
    Ok(success_response(products))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    let product = state.products.get_product(id).await?;
    Ok(success_response(product))
}

async fn get_product_by_description(
    State(state): State<AppState>,
    Path(description): Path<String>,
) -> Result<Response, ServiceError> {
    let product = state.products.find_product_by_description(&description).await?;
    Ok(success_response(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    state.products.delete_product(id).await?;
    Ok(no_content_response())
}

async fn list_bom(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    let lines = state.bom.list_associated(id).await?;
    Ok(success_response(lines))
}

async fn associate_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssociateMaterialRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&payload)?;
    state
        .bom
        .associate(id, &payload.material_description, payload.quantity_required)
        .await?;
    let lines = state.bom.list_associated(id).await?;
    Ok(created_response(lines))
}

async fn disassociate_material(
    State(state): State<AppState>,
    Path((id, material_description)): Path<(i64, String)>,
) -> Result<Response, ServiceError> {
    state.bom.disassociate(id, &material_description).await?;
    Ok(no_content_response())
}
