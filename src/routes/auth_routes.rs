use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{CreateSuperAdminRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::middleware::extract::AppJson;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/create-super-admin", post(create_super_admin))
}

async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let controller = AuthController::new(state.pool().await?);
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool().await?);
    let response = controller.login(request, &state.jwt).await?;
    Ok(Json(response))
}

async fn create_super_admin(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateSuperAdminRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let controller = AuthController::new(state.pool().await?);
    let response = controller.create_super_admin(request, &state.config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
