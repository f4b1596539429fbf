use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::car::CarStatus;
use crate::models::car_request::RequestStatus;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub destination: String,
    pub purpose: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub status: RequestStatus,
}

// Estadísticas por vehículo (todas las solicitudes con vehículo asignado)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarUsage {
    pub car_id: Uuid,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub total_trips: u32,
    pub total_hours: f64,
    pub status: CarStatus,
    pub recent_trips: Vec<TripSummary>,
}

// Estadísticas por conductor (solo solicitudes APPROVED)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverUsage {
    pub driver_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub total_trips: u32,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CarStatusCount {
    pub status: CarStatus,
    pub count: i64,
}

// Response de /car-usage
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReportResponse {
    pub car_stats: Vec<CarUsage>,
    pub driver_stats: Vec<DriverUsage>,
    pub car_status_count: Vec<CarStatusCount>,
}
