use sqlx::PgPool;

use crate::dto::report_dto::CarStatusCount;
use crate::services::report_service::UsageRow;
use crate::utils::errors::AppError;

pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todas las solicitudes con vehículo y conductor resueltos, por fecha de inicio
    pub async fn usage_rows(&self) -> Result<Vec<UsageRow>, AppError> {
        let rows = sqlx::query_as::<_, UsageRow>(
            r#"
            SELECT r.car_id, r.driver_id, r.status, r.start_datetime, r.end_datetime,
                   r.destination, r.purpose,
                   c.brand, c.model, c.license_plate, c.status AS car_status,
                   d.first_name AS driver_first_name, d.last_name AS driver_last_name
            FROM car_requests r
            LEFT JOIN cars c ON c.id = r.car_id
            LEFT JOIN users d ON d.id = r.driver_id
            ORDER BY r.start_datetime
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn car_status_count(&self) -> Result<Vec<CarStatusCount>, AppError> {
        let counts = sqlx::query_as::<_, CarStatusCount>(
            "SELECT status, COUNT(*) AS count FROM cars GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}
