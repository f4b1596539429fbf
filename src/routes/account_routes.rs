use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::account_controller::AccountController;
use crate::dto::user_dto::{UpdateAccountRequest, UserResponse};
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::AppJson;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_account_router() -> Router<AppState> {
    Router::new().route("/", get(get_account).put(update_account))
}

async fn get_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let controller = AccountController::new(state.pool().await?);
    let response = controller.get(user.user_id).await?;
    Ok(Json(response))
}

async fn update_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(request): AppJson<UpdateAccountRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = AccountController::new(state.pool().await?);
    let response = controller.update(user.user_id, request).await?;
    Ok(Json(response))
}
