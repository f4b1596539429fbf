use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::car::{Car, CarChanges, NewCar};
use crate::utils::errors::AppError;

/// Conductor de una solicitud APPROVED en curso
#[derive(Debug, sqlx::FromRow)]
pub struct ActiveDriver {
    pub car_id: Uuid,
    pub driver_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
}

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, car: NewCar) -> Result<Car, AppError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, brand, model, license_plate, capacity, status, car_type, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(car.brand)
        .bind(car.model)
        .bind(car.license_plate)
        .bind(car.capacity)
        .bind(car.status)
        .bind(car.car_type)
        .bind(car.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn list(&self) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(cars)
    }

    /// Vehículos que no están en mantenimiento
    pub async fn list_in_service(&self) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE status <> 'MAINTENANCE' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    pub async fn license_plate_exists(
        &self,
        license_plate: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM cars WHERE license_plate = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(license_plate)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(&self, id: Uuid, changes: CarChanges) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars SET
                brand = COALESCE($2, brand),
                model = COALESCE($3, model),
                license_plate = COALESCE($4, license_plate),
                capacity = COALESCE($5, capacity),
                status = COALESCE($6, status),
                car_type = COALESCE($7, car_type),
                notes = COALESCE($8, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.brand)
        .bind(changes.model)
        .bind(changes.license_plate)
        .bind(changes.capacity)
        .bind(changes.status)
        .bind(changes.car_type)
        .bind(changes.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Conductores de las solicitudes APPROVED cuya ventana contiene `now`
    pub async fn active_drivers(&self, now: DateTime<Utc>) -> Result<Vec<ActiveDriver>, AppError> {
        let drivers = sqlx::query_as::<_, ActiveDriver>(
            r#"
            SELECT r.car_id, u.id AS driver_id, u.first_name, u.last_name, u.position, u.department
            FROM car_requests r
            JOIN users u ON u.id = r.driver_id
            WHERE r.status = 'APPROVED'
              AND r.car_id IS NOT NULL
              AND r.start_datetime <= $1
              AND r.end_datetime >= $1
            ORDER BY r.start_datetime
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }
}
