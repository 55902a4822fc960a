use super::{created_response, no_content_response, success_response, validate_input};
use crate::{
    errors::ServiceError,
    services::materials::MaterialInput,
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Creates the router for material endpoints
pub fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_material).get(list_materials))
        .route("/replenish", post(replenish_stock))
        .route(
            "/:id",
            get(get_material).put(update_material).delete(delete_material),
        )
}

// Request and response DTOs

#[derive(Debug, Deserialize, Validate)]
pub struct MaterialRequest {
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(range(min = 1, message = "current_stock must be greater than zero"))]
    pub current_stock: i64,
    #[validate(range(min = 1, message = "reorder_threshold must be greater than zero"))]
    pub reorder_threshold: i64,
    #[validate(range(min = 1, message = "reorder_lead_time_days must be greater than zero"))]
    pub reorder_lead_time_days: i64,
}

impl From<MaterialRequest> for MaterialInput {
    fn from(req: MaterialRequest) -> Self {
        MaterialInput {
            description: req.description,
            current_stock: req.current_stock,
            reorder_threshold: req.reorder_threshold,
            reorder_lead_time_days: req.reorder_lead_time_days,
        }
    }
}

/// The sweep is a bulk mutation, so the caller has to confirm it explicitly.
#[derive(Debug, Deserialize)]
pub struct ReplenishRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ReplenishResponse {
    pub materials_updated: u64,
}

// Handlers

async fn create_material(
    State(state): State<AppState>,
    Json(payload): Json<MaterialRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&payload)?;
    let material = state.materials.create_material(payload.into()).await?;
    Ok(created_response(material))
}

async fn list_materials(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let materials = state.materials.list_materials().await?;
    Ok(success_response(materials))
}

async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    let material = state.materials.get_material(id).await?;
    Ok(success_response(material))
}

async fn update_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MaterialRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&payload)?;
    let material = state.materials.update_material(id, payload.into()).await?;
    Ok(success_response(material))
}

async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    state.materials.delete_material(id).await?;
    Ok(no_content_response())
}

async fn replenish_stock(
    State(state): State<AppState>,
    Json(payload): Json<ReplenishRequest>,
) -> Result<Response, ServiceError> {
    if !payload.confirm {
        return Err(ServiceError::ValidationError(
            "Stock replenishment requires explicit confirmation".to_string(),
        ));
    }
    let materials_updated = state.materials.replenish_stock().await?;
    Ok(success_response(ReplenishResponse { materials_updated }))
}
