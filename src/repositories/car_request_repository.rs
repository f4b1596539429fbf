use sqlx::PgPool;
use uuid::Uuid;

use crate::models::car_request::{CarRequest, CarRequestDetails, NewCarRequest, RequestStatus};
use crate::services::availability_service::{Commitment, TimeWindow};
use crate::services::request_lifecycle::RequestScope;
use crate::utils::errors::AppError;

// Solicitud con solicitante, admin, conductor, aprobador y vehículo resueltos
const DETAILS_SELECT: &str = r#"
    SELECT r.*,
           req.first_name AS requester_first_name, req.last_name AS requester_last_name,
           req.department AS requester_department, req.position AS requester_position,
           req.phone_number AS requester_phone_number,
           adm.first_name AS admin_first_name, adm.last_name AS admin_last_name,
           adm.department AS admin_department, adm.position AS admin_position,
           drv.first_name AS driver_first_name, drv.last_name AS driver_last_name,
           drv.department AS driver_department, drv.position AS driver_position,
           drv.phone_number AS driver_phone_number,
           apr.first_name AS approver_first_name, apr.last_name AS approver_last_name,
           apr.department AS approver_department, apr.position AS approver_position,
           c.brand AS car_brand, c.model AS car_model,
           c.license_plate AS car_license_plate, c.car_type AS car_type
    FROM car_requests r
    LEFT JOIN users req ON req.id = r.user_id
    LEFT JOIN users adm ON adm.id = r.admin_id
    LEFT JOIN users drv ON drv.id = r.driver_id
    LEFT JOIN users apr ON apr.id = r.approver_id
    LEFT JOIN cars c ON c.id = r.car_id
"#;

fn status_names(statuses: &[RequestStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

pub struct CarRequestRepository {
    pool: PgPool,
}

impl CarRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: NewCarRequest) -> Result<CarRequest, AppError> {
        let request = sqlx::query_as::<_, CarRequest>(
            r#"
            INSERT INTO car_requests (id, user_id, start_datetime, end_datetime, purpose, destination,
                                      passenger_count, travel_type, usage_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'PENDING')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(request.start_datetime)
        .bind(request.end_datetime)
        .bind(request.purpose)
        .bind(request.destination)
        .bind(request.passenger_count)
        .bind(request.travel_type)
        .bind(request.usage_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CarRequest>, AppError> {
        let request = sqlx::query_as::<_, CarRequest>("SELECT * FROM car_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    /// Solicitudes ASSIGNED/APPROVED que tocan la ventana. El motor de
    /// disponibilidad vuelve a aplicar el predicado sobre estas filas.
    pub async fn find_commitments(&self, window: &TimeWindow) -> Result<Vec<Commitment>, AppError> {
        let commitments = sqlx::query_as::<_, Commitment>(
            r#"
            SELECT car_id, driver_id, status, start_datetime, end_datetime
            FROM car_requests
            WHERE status::text = ANY($1)
              AND start_datetime <= $3
              AND end_datetime >= $2
            "#,
        )
        .bind(status_names(&RequestStatus::COMMITTING))
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(commitments)
    }

    pub async fn find_details(&self, id: Uuid) -> Result<Option<CarRequestDetails>, AppError> {
        let sql = format!("{} WHERE r.id = $1", DETAILS_SELECT);
        let details = sqlx::query_as::<_, CarRequestDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(details)
    }

    /// Listado según la visibilidad del actor, más recientes primero
    pub async fn list_details(&self, scope: &RequestScope) -> Result<Vec<CarRequestDetails>, AppError> {
        let filter = match scope {
            RequestScope::All => "",
            RequestScope::Status(_) => "WHERE r.status = $1",
            RequestScope::Driver(_) => "WHERE r.driver_id = $1",
            RequestScope::Requester(_) => "WHERE r.user_id = $1",
        };
        let sql = format!("{} {} ORDER BY r.created_at DESC", DETAILS_SELECT, filter);

        let query = sqlx::query_as::<_, CarRequestDetails>(&sql);
        let query = match scope {
            RequestScope::All => query,
            RequestScope::Status(status) => query.bind(*status),
            RequestScope::Driver(id) | RequestScope::Requester(id) => query.bind(*id),
        };

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Asignación condicional: solo se escribe si el estado sigue en `expected`.
    /// `None` significa que ninguna fila cumplió la condición.
    pub async fn assign(
        &self,
        id: Uuid,
        car_id: Uuid,
        driver_id: Uuid,
        admin_id: Uuid,
        expected: &[RequestStatus],
    ) -> Result<Option<CarRequest>, AppError> {
        let request = sqlx::query_as::<_, CarRequest>(
            r#"
            UPDATE car_requests
            SET car_id = $2, driver_id = $3, admin_id = $4, status = 'ASSIGNED'
            WHERE id = $1 AND status::text = ANY($5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(car_id)
        .bind(driver_id)
        .bind(admin_id)
        .bind(status_names(expected))
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Aprobación o rechazo condicional
    pub async fn decide(
        &self,
        id: Uuid,
        target: RequestStatus,
        approver_id: Uuid,
        expected: &[RequestStatus],
    ) -> Result<Option<CarRequest>, AppError> {
        let request = sqlx::query_as::<_, CarRequest>(
            r#"
            UPDATE car_requests
            SET status = $2, approver_id = $3
            WHERE id = $1 AND status::text = ANY($4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(target)
        .bind(approver_id)
        .bind(status_names(expected))
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names_match_enum_labels() {
        assert_eq!(
            status_names(&RequestStatus::COMMITTING),
            vec!["ASSIGNED".to_string(), "APPROVED".to_string()]
        );
    }
}
