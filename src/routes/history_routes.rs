use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::history_controller::HistoryController;
use crate::dto::request_dto::CarRequestResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_history_router() -> Router<AppState> {
    Router::new()
        .route("/", get(history))
        .route("/:user_id", get(history_by_requester))
}

async fn history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<CarRequestResponse>>, AppError> {
    let controller = HistoryController::new(state.pool().await?);
    let response = controller.for_actor(&user).await?;
    Ok(Json(response))
}

async fn history_by_requester(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<CarRequestResponse>>, AppError> {
    let controller = HistoryController::new(state.pool().await?);
    let response = controller.for_requester(user_id).await?;
    Ok(Json(response))
}
