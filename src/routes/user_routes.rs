use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{CreateUserRequest, DeleteUserQuery, UpdateUserRequest, UserListQuery, UserResponse};
use crate::middleware::auth::{AuthUser, ADMIN_ROLES};
use crate::middleware::extract::{AppJson, AppQuery};
use crate::models::user::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .put(update_user)
                .delete(delete_user),
        )
        .route("/driver", get(list_drivers))
}

async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(query): AppQuery<UserListQuery>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    auth.require_role(ADMIN_ROLES)?;
    let controller = UserController::new(state.pool().await?);
    let response = controller.list(query.role).await?;
    Ok(Json(response))
}

async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let actor = auth.require_role(&[UserRole::SuperAdmin])?;
    let controller = UserController::new(state.pool().await?);
    let response = controller.create(actor, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let actor = auth.require_role(ADMIN_ROLES)?;
    let controller = UserController::new(state.pool().await?);
    let response = controller.update(actor, request).await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(query): AppQuery<DeleteUserQuery>,
) -> Result<Json<Value>, AppError> {
    let actor = auth.require_role(ADMIN_ROLES)?;
    let controller = UserController::new(state.pool().await?);
    controller.delete(actor, query.id.as_deref()).await?;
    Ok(Json(json!({ "message": "User deleted" })))
}

async fn list_drivers(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool().await?);
    let response = controller.list_drivers().await?;
    Ok(Json(response))
}
