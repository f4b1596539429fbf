//! Claims del JWT y usuario autenticado

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{User, UserRole};

/// Claims del JWT. Los nombres en camelCase son los que consume el frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtClaims {
    pub user_id: Uuid,
    pub role: UserRole,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub position: String,
    pub exp: i64,
    pub iat: i64,
}

/// Usuario autenticado que se inyecta en los handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub email: String,
}

impl From<JwtClaims> for AuthenticatedUser {
    fn from(claims: JwtClaims) -> Self {
        Self {
            user_id: claims.user_id,
            role: claims.role,
            email: claims.email,
        }
    }
}

impl JwtClaims {
    pub fn for_user(user: &User, issued_at: i64, expires_at: i64) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            department: user.department.clone(),
            position: user.position.clone(),
            exp: expires_at,
            iat: issued_at,
        }
    }
}
