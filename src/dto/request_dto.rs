use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::car::CarType;
use crate::models::car_request::{CarRequestDetails, RequestStatus};

// Body de `POST /form`. Las fechas llegan como string del formulario.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequestBody {
    pub start_datetime: String,
    pub end_datetime: String,
    #[validate(length(min = 1, message = "Purpose is required"))]
    pub purpose: String,
    #[validate(length(min = 1, message = "Destination is required"))]
    pub destination: String,
    #[validate(range(min = 1, message = "At least one passenger is required"))]
    pub passenger_count: i32,
    #[validate(length(min = 1, message = "Travel type is required"))]
    pub travel_type: String,
    #[validate(length(min = 1, message = "Usage type is required"))]
    pub usage_type: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequestBody {
    pub car_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

// Body de approve / reject
#[derive(Debug, Deserialize)]
pub struct ApprovalBody {
    pub approver_id: Option<Uuid>,
}

/// Datos públicos de una persona referenciada por la solicitud
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl PartySummary {
    /// Solicitante borrado o inexistente
    pub fn unknown_requester() -> Self {
        Self {
            id: None,
            first_name: "Unknown".to_string(),
            last_name: "user".to_string(),
            department: "-".to_string(),
            position: "-".to_string(),
            phone_number: None,
        }
    }

    /// Solicitud todavía sin admin asignado
    pub fn unassigned_admin() -> Self {
        Self {
            id: None,
            first_name: "-".to_string(),
            last_name: String::new(),
            department: "-".to_string(),
            position: "-".to_string(),
            phone_number: None,
        }
    }

    fn resolve(
        id: Option<Uuid>,
        first_name: Option<String>,
        last_name: Option<String>,
        department: Option<String>,
        position: Option<String>,
        phone_number: Option<String>,
    ) -> Option<Self> {
        Some(Self {
            id: Some(id?),
            first_name: first_name?,
            last_name: last_name?,
            department: department.unwrap_or_default(),
            position: position.unwrap_or_default(),
            phone_number,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSummary {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    #[serde(rename = "type")]
    pub car_type: CarType,
}

/// Cómo se rellenan las referencias ausentes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRendering {
    /// Listado general: el admin ausente se muestra como placeholder
    List,
    /// Detalle e historial: solo el solicitante lleva placeholder
    Detail,
}

// Response de solicitud con las partes resueltas. Las claves `*_id`
// contienen el objeto resumido, como espera el frontend.
#[derive(Debug, Serialize)]
pub struct CarRequestResponse {
    pub id: Uuid,
    pub user_id: PartySummary,
    pub admin_id: Option<PartySummary>,
    pub driver_id: Option<PartySummary>,
    pub car_id: Option<CarSummary>,
    pub approver_id: Option<PartySummary>,
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

impl CarRequestResponse {
    pub fn render(details: CarRequestDetails, mode: PartyRendering) -> Self {
        let request = details.request;

        let requester = PartySummary::resolve(
            request.user_id,
            details.requester_first_name,
            details.requester_last_name,
            details.requester_department,
            details.requester_position,
            details.requester_phone_number,
        )
        .unwrap_or_else(PartySummary::unknown_requester);

        let admin = PartySummary::resolve(
            request.admin_id,
            details.admin_first_name,
            details.admin_last_name,
            details.admin_department,
            details.admin_position,
            None,
        );
        let admin = match mode {
            PartyRendering::List => Some(admin.unwrap_or_else(PartySummary::unassigned_admin)),
            PartyRendering::Detail => admin,
        };

        let driver = PartySummary::resolve(
            request.driver_id,
            details.driver_first_name,
            details.driver_last_name,
            details.driver_department,
            details.driver_position,
            details.driver_phone_number,
        );

        let approver = PartySummary::resolve(
            request.approver_id,
            details.approver_first_name,
            details.approver_last_name,
            details.approver_department,
            details.approver_position,
            None,
        );

        let car = match (
            request.car_id,
            details.car_brand,
            details.car_model,
            details.car_license_plate,
            details.car_type,
        ) {
            (Some(id), Some(brand), Some(model), Some(license_plate), Some(car_type)) => {
                Some(CarSummary {
                    id,
                    brand,
                    model,
                    license_plate,
                    car_type,
                })
            }
            _ => None,
        };

        Self {
            id: request.id,
            user_id: requester,
            admin_id: admin,
            driver_id: driver,
            car_id: car,
            approver_id: approver,
            start_datetime: request.start_datetime,
            end_datetime: request.end_datetime,
            purpose: request.purpose,
            destination: request.destination,
            passenger_count: request.passenger_count,
            travel_type: request.travel_type,
            usage_type: request.usage_type,
            status: request.status,
            created_at: request.created_at,
        }
    }
}
