use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{Gender, User, UserRole};
use crate::utils::validation::validate_phone;

// Request para crear un usuario desde la gestión de usuarios
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(custom = "validate_phone")]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 6, message = "Password must have at least 6 characters"))]
    pub password: String,
    pub role: Option<UserRole>,
    pub driver_license_expiry: Option<String>,
}

// Request para editar un usuario (admin). `id` identifica al usuario.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone_number: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub driver_license_expiry: Option<String>,
}

// Request para editar la cuenta propia. El rol no se acepta aquí.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone_number: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    pub id: Option<String>,
}

// Response de usuario (nunca incluye el hash del password)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub phone_number: String,
    pub position: String,
    pub department: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_license_expiry: Option<NaiveDate>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            birth_date: user.birth_date,
            email: user.email,
            phone_number: user.phone_number,
            position: user.position,
            department: user.department,
            role: user.role,
            created_at: user.created_at,
            driver_license_expiry: None,
        }
    }
}

impl UserResponse {
    pub fn with_license(mut self, expiry: Option<NaiveDate>) -> Self {
        self.driver_license_expiry = expiry;
        self
    }
}
