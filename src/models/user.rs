//! Modelo de User
//! 
//! Este módulo contiene el struct User, los roles del sistema y las reglas
//! de administración de usuarios que dependen del rol.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::{forbidden_error, AppError};

/// Roles del sistema - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
    SuperAdmin,
    Driver,
    Approver,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
            UserRole::SuperAdmin => "super_admin",
            UserRole::Driver => "driver",
            UserRole::Approver => "approver",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            "super_admin" => Ok(UserRole::SuperAdmin),
            "driver" => Ok(UserRole::Driver),
            "approver" => Ok(UserRole::Approver),
            other => Err(AppError::BadRequest(format!("Unknown role '{}'", other))),
        }
    }
}

/// Género - mapea al ENUM user_gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub phone_number: String,
    pub position: String,
    pub department: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar un usuario nuevo (password ya hasheado)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub phone_number: String,
    pub position: String,
    pub department: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Cambios parciales sobre un usuario existente
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}

/// Un admin no puede crear ni promover a super_admin
pub fn ensure_can_grant_role(actor: UserRole, requested: UserRole) -> Result<(), AppError> {
    if actor == UserRole::Admin && requested == UserRole::SuperAdmin {
        return Err(forbidden_error("grant role", "admin cannot grant super_admin"));
    }
    Ok(())
}

/// Un admin no puede eliminar a un super_admin
pub fn ensure_can_delete(actor: UserRole, target: UserRole) -> Result<(), AppError> {
    if actor == UserRole::Admin && target == UserRole::SuperAdmin {
        return Err(forbidden_error("delete user", "admin cannot delete super_admin"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_str() {
        for role in [
            UserRole::User,
            UserRole::Admin,
            UserRole::SuperAdmin,
            UserRole::Driver,
            UserRole::Approver,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&UserRole::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");
    }

    #[test]
    fn test_admin_cannot_delete_super_admin() {
        let err = ensure_can_delete(UserRole::Admin, UserRole::SuperAdmin).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(ensure_can_delete(UserRole::SuperAdmin, UserRole::SuperAdmin).is_ok());
        assert!(ensure_can_delete(UserRole::Admin, UserRole::Driver).is_ok());
    }

    #[test]
    fn test_admin_cannot_grant_super_admin() {
        assert!(ensure_can_grant_role(UserRole::Admin, UserRole::SuperAdmin).is_err());
        assert!(ensure_can_grant_role(UserRole::Admin, UserRole::Approver).is_ok());
        assert!(ensure_can_grant_role(UserRole::SuperAdmin, UserRole::SuperAdmin).is_ok());
    }
}
