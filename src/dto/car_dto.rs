use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::request_dto::PartySummary;
use crate::models::car::{Car, CarStatus, CarType};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "License plate is required"))]
    pub license_plate: String,
    #[validate(range(min = 1, message = "Capacity must be greater than 0"))]
    pub capacity: i32,
    pub status: Option<CarStatus>,
    #[serde(rename = "type")]
    pub car_type: CarType,
    pub notes: Option<String>,
}

// Request para actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    #[validate(length(min = 1))]
    pub brand: Option<String>,
    #[validate(length(min = 1))]
    pub model: Option<String>,
    #[validate(length(min = 1))]
    pub license_plate: Option<String>,
    #[validate(range(min = 1, message = "Capacity must be greater than 0"))]
    pub capacity: Option<i32>,
    pub status: Option<CarStatus>,
    #[serde(rename = "type")]
    pub car_type: Option<CarType>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CarListQuery {
    #[serde(rename = "includeDriver")]
    pub include_driver: Option<String>,
}

impl CarListQuery {
    pub fn include_driver(&self) -> bool {
        self.include_driver.as_deref() == Some("true")
    }
}

// Response de vehículo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub capacity: i32,
    pub status: CarStatus,
    #[serde(rename = "type")]
    pub car_type: CarType,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_driver: Option<PartySummary>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            brand: car.brand,
            model: car.model,
            license_plate: car.license_plate,
            capacity: car.capacity,
            status: car.status,
            car_type: car.car_type,
            notes: car.notes,
            created_at: car.created_at,
            updated_at: car.updated_at,
            current_driver: None,
        }
    }
}
