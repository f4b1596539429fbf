use sqlx::PgPool;
use tracing::info;

use crate::dto::report_dto::UsageReportResponse;
use crate::repositories::report_repository::ReportRepository;
use crate::services::report_service::{
    car_csv, car_stats, driver_csv, driver_stats, monthly_car_usage, monthly_driver_usage, ReportKind,
};
use crate::utils::errors::AppError;

pub struct ReportController {
    repository: ReportRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReportRepository::new(pool),
        }
    }

    pub async fn usage(&self) -> Result<UsageReportResponse, AppError> {
        let rows = self.repository.usage_rows().await?;
        let car_status_count = self.repository.car_status_count().await?;

        Ok(UsageReportResponse {
            car_stats: car_stats(&rows),
            driver_stats: driver_stats(&rows),
            car_status_count,
        })
    }

    /// Contenido CSV del reporte mensual pedido
    pub async fn download(&self, kind: ReportKind) -> Result<String, AppError> {
        let rows = self.repository.usage_rows().await?;

        let csv = match kind {
            ReportKind::Car => car_csv(&monthly_car_usage(&rows)),
            ReportKind::Driver => driver_csv(&monthly_driver_usage(&rows)),
        };

        info!("📊 Reporte {} generado ({} solicitudes)", kind.file_name(), rows.len());
        Ok(csv)
    }
}
