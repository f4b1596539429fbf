//! Modelo de CarRequest
//! 
//! Una solicitud de uso de vehículo y su máquina de estados:
//! PENDING → ASSIGNED → APPROVED, o → REJECTED desde PENDING/ASSIGNED.
//! CANCELLED existe en el schema pero ninguna transición lo asigna.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use uuid::Uuid;

use super::car::CarType;
use super::user::UserRole;

/// Estado de la solicitud - mapea al ENUM request_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "request_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Assigned,
    Approved,
    Rejected,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Assigned => "ASSIGNED",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Cancelled => "CANCELLED",
        }
    }

    /// Ninguna transición sale de estos estados
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Approved | RequestStatus::Rejected | RequestStatus::Cancelled
        )
    }

    /// Solo ASSIGNED y APPROVED bloquean el vehículo y el conductor
    pub fn is_committing(&self) -> bool {
        matches!(self, RequestStatus::Assigned | RequestStatus::Approved)
    }

    pub const COMMITTING: [RequestStatus; 2] = [RequestStatus::Assigned, RequestStatus::Approved];
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transiciones aceptadas por el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Assign,
    Approve,
    Reject,
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Transition::Assign => "assign",
            Transition::Approve => "approve",
            Transition::Reject => "reject",
        }
    }

    /// Estado resultante
    pub fn target(&self) -> RequestStatus {
        match self {
            Transition::Assign => RequestStatus::Assigned,
            Transition::Approve => RequestStatus::Approved,
            Transition::Reject => RequestStatus::Rejected,
        }
    }

    /// Estados desde los que la transición es válida. Hoy coinciden para las
    /// tres transiciones: cualquier estado no terminal.
    pub fn allowed_from(&self) -> &'static [RequestStatus] {
        &[RequestStatus::Pending, RequestStatus::Assigned]
    }

    /// Roles que pueden ejecutar la transición
    pub fn allowed_roles(&self) -> &'static [UserRole] {
        match self {
            Transition::Assign => &[UserRole::Admin, UserRole::SuperAdmin],
            Transition::Approve | Transition::Reject => {
                &[UserRole::Approver, UserRole::SuperAdmin]
            }
        }
    }
}

/// CarRequest principal - mapea exactamente a la tabla car_requests
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CarRequest {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub admin_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub approver_id: Option<Uuid>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub purpose: String,
    pub destination: String,
    pub passenger_count: i32,
    pub travel_type: String,
    pub usage_type: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar una solicitud nueva
#[derive(Debug, Clone)]
pub struct NewCarRequest {
    pub user_id: Uuid,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub purpose: String,
    pub destination: String,
    pub passenger_count: i32,
    pub travel_type: String,
    pub usage_type: String,
}

/// Solicitud con las partes resueltas por LEFT JOIN. Las columnas de una
/// referencia ausente (o de un registro ya borrado) llegan todas a NULL.
#[derive(Debug, Clone, FromRow)]
pub struct CarRequestDetails {
    #[sqlx(flatten)]
    pub request: CarRequest,

    pub requester_first_name: Option<String>,
    pub requester_last_name: Option<String>,
    pub requester_department: Option<String>,
    pub requester_position: Option<String>,
    pub requester_phone_number: Option<String>,

    pub admin_first_name: Option<String>,
    pub admin_last_name: Option<String>,
    pub admin_department: Option<String>,
    pub admin_position: Option<String>,

    pub driver_first_name: Option<String>,
    pub driver_last_name: Option<String>,
    pub driver_department: Option<String>,
    pub driver_position: Option<String>,
    pub driver_phone_number: Option<String>,

    pub approver_first_name: Option<String>,
    pub approver_last_name: Option<String>,
    pub approver_department: Option<String>,
    pub approver_position: Option<String>,

    pub car_brand: Option<String>,
    pub car_model: Option<String>,
    pub car_license_plate: Option<String>,
    pub car_type: Option<CarType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::Assigned.is_terminal());
    }

    #[test]
    fn test_committing_states() {
        assert!(RequestStatus::Assigned.is_committing());
        assert!(RequestStatus::Approved.is_committing());
        assert!(!RequestStatus::Pending.is_committing());
        assert!(!RequestStatus::Rejected.is_committing());
        assert!(!RequestStatus::Cancelled.is_committing());
    }

    #[test]
    fn test_no_transition_leaves_terminal_state() {
        for transition in [Transition::Assign, Transition::Approve, Transition::Reject] {
            assert!(transition
                .allowed_from()
                .iter()
                .all(|status| !status.is_terminal()));
        }
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Assigned).unwrap(),
            "\"ASSIGNED\""
        );
    }
}
