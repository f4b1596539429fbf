use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::request_dto::{CarRequestResponse, PartyRendering};
use crate::models::auth::AuthenticatedUser;
use crate::repositories::car_request_repository::CarRequestRepository;
use crate::services::request_lifecycle::RequestScope;
use crate::utils::errors::AppError;

pub struct HistoryController {
    requests: CarRequestRepository,
}

impl HistoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            requests: CarRequestRepository::new(pool),
        }
    }

    async fn render(&self, scope: RequestScope) -> Result<Vec<CarRequestResponse>, AppError> {
        let details = self.requests.list_details(&scope).await?;
        Ok(details
            .into_iter()
            .map(|d| CarRequestResponse::render(d, PartyRendering::Detail))
            .collect())
    }

    /// Historial visible para el rol del actor
    pub async fn for_actor(&self, actor: &AuthenticatedUser) -> Result<Vec<CarRequestResponse>, AppError> {
        self.render(RequestScope::for_actor(actor.role, actor.user_id)).await
    }

    /// Solicitudes de un solicitante; sin resultados es 404
    pub async fn for_requester(&self, user_id: Uuid) -> Result<Vec<CarRequestResponse>, AppError> {
        let requests = self.render(RequestScope::Requester(user_id)).await?;
        if requests.is_empty() {
            return Err(AppError::NotFound("No requests found".to_string()));
        }
        Ok(requests)
    }
}
