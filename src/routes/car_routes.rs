use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::controllers::car_controller::CarController;
use crate::dto::car_dto::{CarListQuery, CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::middleware::auth::{AuthUser, ADMIN_ROLES};
use crate::middleware::extract::{AppJson, AppQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/:id", put(update_car).delete(delete_car))
}

async fn list_cars(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppQuery(query): AppQuery<CarListQuery>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = CarController::new(state.pool().await?);
    let response = controller.list(query.include_driver()).await?;
    Ok(Json(response))
}

async fn create_car(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), AppError> {
    auth.require_role(ADMIN_ROLES)?;
    let controller = CarController::new(state.pool().await?);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_car(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<UpdateCarRequest>,
) -> Result<Json<CarResponse>, AppError> {
    auth.require_role(ADMIN_ROLES)?;
    let controller = CarController::new(state.pool().await?);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_car(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    auth.require_role(ADMIN_ROLES)?;
    let controller = CarController::new(state.pool().await?);
    controller.delete(id).await?;
    Ok(Json(json!({ "message": "Car deleted" })))
}
