use sqlx::PgPool;
use tracing::debug;

use crate::dto::car_dto::CarResponse;
use crate::dto::user_dto::UserResponse;
use crate::models::user::UserRole;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::car_request_repository::CarRequestRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::availability_service::{
    filter_available, AvailabilityQuery, Commitment, TimeWindow,
};
use crate::utils::errors::AppError;
use crate::utils::validation::parse_optional_datetime;

pub struct AvailabilityController {
    cars: CarRepository,
    users: UserRepository,
    requests: CarRequestRepository,
}

impl AvailabilityController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            requests: CarRequestRepository::new(pool),
        }
    }

    /// Una ventana invertida se rechaza: el prefiltro SQL y el predicado de
    /// solape solo coinciden cuando `start <= end`.
    fn window(query: &AvailabilityQuery) -> Result<Option<TimeWindow>, AppError> {
        let start = parse_optional_datetime("start_datetime", query.start_datetime.as_deref())?;
        let end = parse_optional_datetime("end_datetime", query.end_datetime.as_deref())?;

        match TimeWindow::from_bounds(start, end) {
            Some(window) if window.start > window.end => Err(AppError::BadRequest(
                "start_datetime must not be after end_datetime".to_string(),
            )),
            window => Ok(window),
        }
    }

    async fn commitments(&self, window: Option<&TimeWindow>) -> Result<Vec<Commitment>, AppError> {
        match window {
            Some(window) => self.requests.find_commitments(window).await,
            None => Ok(Vec::new()),
        }
    }

    /// Vehículos fuera de mantenimiento sin reservas que se solapen
    pub async fn available_cars(&self, query: AvailabilityQuery) -> Result<Vec<CarResponse>, AppError> {
        let window = Self::window(&query)?;
        let cars = self.cars.list_in_service().await?;
        let commitments = self.commitments(window.as_ref()).await?;

        let available = filter_available(cars, &commitments, window.as_ref());
        debug!("🚗 {} vehículos disponibles", available.len());

        Ok(available.into_iter().map(CarResponse::from).collect())
    }

    pub async fn available_drivers(&self, query: AvailabilityQuery) -> Result<Vec<UserResponse>, AppError> {
        let window = Self::window(&query)?;
        let drivers = self.users.list(Some(UserRole::Driver)).await?;
        let commitments = self.commitments(window.as_ref()).await?;

        let available = filter_available(drivers, &commitments, window.as_ref());
        debug!("🧑‍✈️ {} conductores disponibles", available.len());

        Ok(available.into_iter().map(UserResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(start: Option<&str>, end: Option<&str>) -> AvailabilityQuery {
        AvailabilityQuery {
            start_datetime: start.map(str::to_string),
            end_datetime: end.map(str::to_string),
        }
    }

    #[test]
    fn test_reversed_window_is_rejected() {
        let err = AvailabilityController::window(&query(
            Some("2024-01-10T10:00:00Z"),
            Some("2024-01-10T08:00:00Z"),
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_instant_window_is_accepted() {
        let window = AvailabilityController::window(&query(
            Some("2024-01-10T08:00:00Z"),
            Some("2024-01-10T08:00:00Z"),
        ))
        .unwrap();
        assert!(window.is_some());
    }

    #[test]
    fn test_partial_window_means_no_filter() {
        let window = AvailabilityController::window(&query(Some("2024-01-10T08:00:00Z"), None)).unwrap();
        assert!(window.is_none());
    }
}
