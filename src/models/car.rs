//! Modelo de Car
//! 
//! Vehículos reservables. El estado es informativo: la disponibilidad
//! se calcula a partir de las reservas, no de este campo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM car_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "car_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarStatus {
    Available,
    Maintenance,
}

impl CarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Available => "AVAILABLE",
            CarStatus::Maintenance => "MAINTENANCE",
        }
    }

    /// Etiqueta legible usada en los reportes CSV
    pub fn label(&self) -> &'static str {
        match self {
            CarStatus::Available => "Available",
            CarStatus::Maintenance => "Maintenance",
        }
    }
}

impl Default for CarStatus {
    fn default() -> Self {
        CarStatus::Available
    }
}

/// Tipo de vehículo - mapea al ENUM car_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "car_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CarType {
    Sedan,
    Van,
    Pickup,
    Bus,
}

/// Car principal - mapea exactamente a la tabla cars
#[derive(Debug, Clone, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub capacity: i32,
    pub status: CarStatus,
    pub car_type: CarType,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un vehículo nuevo
#[derive(Debug, Clone)]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub capacity: i32,
    pub status: CarStatus,
    pub car_type: CarType,
    pub notes: String,
}

/// Cambios parciales sobre un vehículo
#[derive(Debug, Clone, Default)]
pub struct CarChanges {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub capacity: Option<i32>,
    pub status: Option<CarStatus>,
    pub car_type: Option<CarType>,
    pub notes: Option<String>,
}
