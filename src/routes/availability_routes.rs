use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::controllers::availability_controller::AvailabilityController;
use crate::dto::car_dto::CarResponse;
use crate::dto::user_dto::UserResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::AppQuery;
use crate::services::availability_service::AvailabilityQuery;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_availability_router() -> Router<AppState> {
    Router::new()
        .route("/available-cars", get(available_cars))
        .route("/available-drivers", get(available_drivers))
}

async fn available_cars(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppQuery(query): AppQuery<AvailabilityQuery>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = AvailabilityController::new(state.pool().await?);
    let response = controller.available_cars(query).await?;
    Ok(Json(response))
}

async fn available_drivers(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppQuery(query): AppQuery<AvailabilityQuery>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = AvailabilityController::new(state.pool().await?);
    let response = controller.available_drivers(query).await?;
    Ok(Json(response))
}
