use chrono::NaiveDate;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::driver_license::DriverLicense;
use crate::utils::errors::AppError;

pub struct DriverLicenseRepository {
    pool: PgPool,
}

impl DriverLicenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, user_id: Uuid, expiry_date: NaiveDate) -> Result<DriverLicense, AppError> {
        let license = sqlx::query_as::<_, DriverLicense>(
            r#"
            INSERT INTO driver_licenses (user_id, expiry_date)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET expiry_date = EXCLUDED.expiry_date, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(expiry_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(license)
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM driver_licenses WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find(&self, user_id: Uuid) -> Result<Option<DriverLicense>, AppError> {
        let license =
            sqlx::query_as::<_, DriverLicense>("SELECT * FROM driver_licenses WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(license)
    }

    /// Fecha de vencimiento por usuario, para enriquecer listados
    pub async fn expiry_by_user(&self, user_ids: &[Uuid]) -> Result<HashMap<Uuid, NaiveDate>, AppError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let licenses = sqlx::query_as::<_, DriverLicense>(
            "SELECT * FROM driver_licenses WHERE user_id = ANY($1)",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(licenses
            .into_iter()
            .map(|license| (license.user_id, license.expiry_date))
            .collect())
    }
}
