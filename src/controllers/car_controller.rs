use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::dto::request_dto::PartySummary;
use crate::models::car::{CarChanges, NewCar};
use crate::repositories::car_repository::CarRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct CarController {
    repository: CarRepository,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool),
        }
    }

    /// Con `include_driver` se adjunta el conductor de la solicitud
    /// APPROVED que está en curso ahora mismo
    pub async fn list(&self, include_driver: bool) -> Result<Vec<CarResponse>, AppError> {
        let cars = self.repository.list().await?;
        if !include_driver {
            return Ok(cars.into_iter().map(CarResponse::from).collect());
        }

        let mut drivers: HashMap<Uuid, PartySummary> = HashMap::new();
        for active in self.repository.active_drivers(Utc::now()).await? {
            drivers.entry(active.car_id).or_insert(PartySummary {
                id: Some(active.driver_id),
                first_name: active.first_name,
                last_name: active.last_name,
                department: active.department,
                position: active.position,
                phone_number: None,
            });
        }

        Ok(cars
            .into_iter()
            .map(|car| {
                let current_driver = drivers.remove(&car.id);
                CarResponse {
                    current_driver,
                    ..CarResponse::from(car)
                }
            })
            .collect())
    }

    pub async fn create(&self, request: CreateCarRequest) -> Result<CarResponse, AppError> {
        request.validate()?;

        let license_plate = request.license_plate.trim().to_string();
        if self.repository.license_plate_exists(&license_plate, None).await? {
            return Err(AppError::BadRequest("License plate already exists".to_string()));
        }

        let car = self
            .repository
            .create(NewCar {
                brand: request.brand,
                model: request.model,
                license_plate,
                capacity: request.capacity,
                status: request.status.unwrap_or_default(),
                car_type: request.car_type,
                notes: request.notes.unwrap_or_default(),
            })
            .await?;

        info!("🚗 Vehículo creado: {} {} ({})", car.brand, car.model, car.license_plate);
        Ok(CarResponse::from(car))
    }

    pub async fn update(&self, id: Uuid, request: UpdateCarRequest) -> Result<CarResponse, AppError> {
        request.validate()?;

        let license_plate = request.license_plate.map(|p| p.trim().to_string());
        if let Some(plate) = &license_plate {
            if self.repository.license_plate_exists(plate, Some(id)).await? {
                return Err(AppError::BadRequest("License plate already exists".to_string()));
            }
        }

        let car = self
            .repository
            .update(
                id,
                CarChanges {
                    brand: request.brand,
                    model: request.model,
                    license_plate,
                    capacity: request.capacity,
                    status: request.status,
                    car_type: request.car_type,
                    notes: request.notes,
                },
            )
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        info!("🔧 Vehículo actualizado: {}", car.license_plate);
        Ok(CarResponse::from(car))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Car", &id.to_string()));
        }

        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }
}
