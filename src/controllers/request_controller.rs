use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::request_dto::{
    ApprovalBody, AssignRequestBody, CarRequestResponse, CreateCarRequestBody, PartyRendering,
};
use crate::models::auth::AuthenticatedUser;
use crate::models::car_request::{CarRequest, NewCarRequest, Transition};
use crate::models::user::UserRole;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::car_request_repository::CarRequestRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::request_lifecycle::{authorize, check_transition, RequestScope};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{parse_datetime, validate_window};

pub struct RequestController {
    requests: CarRequestRepository,
    users: UserRepository,
    cars: CarRepository,
}

impl RequestController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            requests: CarRequestRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            cars: CarRepository::new(pool),
        }
    }

    /// Nueva solicitud del usuario autenticado, siempre en PENDING
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        body: CreateCarRequestBody,
    ) -> Result<CarRequest, AppError> {
        body.validate()?;

        let start_datetime = parse_datetime("start_datetime", &body.start_datetime)?;
        let end_datetime = parse_datetime("end_datetime", &body.end_datetime)?;
        validate_window(start_datetime, end_datetime)?;

        let request = self
            .requests
            .create(NewCarRequest {
                user_id: actor.user_id,
                start_datetime,
                end_datetime,
                purpose: body.purpose,
                destination: body.destination,
                passenger_count: body.passenger_count,
                travel_type: body.travel_type,
                usage_type: body.usage_type,
            })
            .await?;

        info!("📝 Solicitud {} creada por {}", request.id, actor.email);
        Ok(request)
    }

    pub async fn list(&self) -> Result<Vec<CarRequestResponse>, AppError> {
        let details = self.requests.list_details(&RequestScope::All).await?;
        Ok(details
            .into_iter()
            .map(|d| CarRequestResponse::render(d, PartyRendering::List))
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CarRequestResponse, AppError> {
        let details = self
            .requests
            .find_details(id)
            .await?
            .ok_or_else(|| not_found_error("Request", &id.to_string()))?;

        Ok(CarRequestResponse::render(details, PartyRendering::Detail))
    }

    pub async fn assign(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        body: AssignRequestBody,
    ) -> Result<CarRequestResponse, AppError> {
        authorize(Transition::Assign, actor.role)?;

        let (car_id, driver_id) = match (body.car_id, body.driver_id) {
            (Some(car_id), Some(driver_id)) => (car_id, driver_id),
            _ => {
                return Err(AppError::BadRequest(
                    "car_id and driver_id are required".to_string(),
                ))
            }
        };

        if self.cars.find_by_id(car_id).await?.is_none() {
            return Err(not_found_error("Car", &car_id.to_string()));
        }
        let driver = self
            .users
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &driver_id.to_string()))?;
        if driver.role != UserRole::Driver {
            return Err(AppError::BadRequest(format!("User '{}' is not a driver", driver_id)));
        }

        let transition = Transition::Assign;
        let updated = self
            .requests
            .assign(id, car_id, driver_id, actor.user_id, transition.allowed_from())
            .await?;
        self.settle(id, transition, updated).await?;

        info!("🚗 Solicitud {} asignada por {} (vehículo {}, conductor {})", id, actor.email, car_id, driver_id);
        self.get(id).await
    }

    pub async fn approve(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        body: ApprovalBody,
    ) -> Result<CarRequestResponse, AppError> {
        self.decide(actor, id, body, Transition::Approve).await
    }

    pub async fn reject(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        body: ApprovalBody,
    ) -> Result<CarRequestResponse, AppError> {
        self.decide(actor, id, body, Transition::Reject).await
    }

    async fn decide(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        body: ApprovalBody,
        transition: Transition,
    ) -> Result<CarRequestResponse, AppError> {
        authorize(transition, actor.role)?;

        let approver_id = body
            .approver_id
            .ok_or_else(|| AppError::BadRequest("approver_id is required".to_string()))?;
        if self.users.find_by_id(approver_id).await?.is_none() {
            return Err(not_found_error("Approver", &approver_id.to_string()));
        }

        let updated = self
            .requests
            .decide(id, transition.target(), approver_id, transition.allowed_from())
            .await?;
        self.settle(id, transition, updated).await?;

        info!("✅ Solicitud {} -> {} por {}", id, transition.target(), actor.email);
        self.get(id).await
    }

    /// Si la actualización condicional no tocó ninguna fila, distingue entre
    /// solicitud inexistente (404) y estado que no admite la transición (409)
    async fn settle(
        &self,
        id: Uuid,
        transition: Transition,
        updated: Option<CarRequest>,
    ) -> Result<(), AppError> {
        if updated.is_some() {
            return Ok(());
        }

        let current = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Request", &id.to_string()))?;
        check_transition(transition, current.status)?;

        // El estado cambió entre la escritura y esta lectura
        Err(AppError::Conflict(format!(
            "Request {} changed concurrently, retry the {}",
            id,
            transition.name()
        )))
    }
}
