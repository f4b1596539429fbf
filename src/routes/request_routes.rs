use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::request_controller::RequestController;
use crate::dto::request_dto::{ApprovalBody, AssignRequestBody, CarRequestResponse, CreateCarRequestBody};
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::AppJson;
use crate::models::car_request::CarRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_request_router() -> Router<AppState> {
    Router::new()
        .route("/form", post(create_request))
        .route("/requests", get(list_requests))
        .route("/requests/:id", get(get_request))
        .route("/requests/:id/assign", put(assign_request))
        .route("/requests/:id/approve", put(approve_request))
        .route("/requests/:id/reject", put(reject_request))
}

async fn create_request(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(body): AppJson<CreateCarRequestBody>,
) -> Result<(StatusCode, Json<CarRequest>), AppError> {
    let controller = RequestController::new(state.pool().await?);
    let response = controller.create(&user, body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_requests(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<CarRequestResponse>>, AppError> {
    let controller = RequestController::new(state.pool().await?);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CarRequestResponse>, AppError> {
    let controller = RequestController::new(state.pool().await?);
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn assign_request(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    AppJson(body): AppJson<AssignRequestBody>,
) -> Result<Json<CarRequestResponse>, AppError> {
    let controller = RequestController::new(state.pool().await?);
    let response = controller.assign(&user, id, body).await?;
    Ok(Json(response))
}

async fn approve_request(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    AppJson(body): AppJson<ApprovalBody>,
) -> Result<Json<CarRequestResponse>, AppError> {
    let controller = RequestController::new(state.pool().await?);
    let response = controller.approve(&user, id, body).await?;
    Ok(Json(response))
}

async fn reject_request(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    AppJson(body): AppJson<ApprovalBody>,
) -> Result<Json<CarRequestResponse>, AppError> {
    let controller = RequestController::new(state.pool().await?);
    let response = controller.reject(&user, id, body).await?;
    Ok(Json(response))
}
