//! Middleware de autenticación JWT
//! 
//! Este módulo maneja la extracción del token Bearer, su verificación
//! y las comprobaciones de rol que hacen los handlers.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::{
    models::{auth::AuthenticatedUser, user::UserRole},
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Roles con acceso a la gestión de usuarios y vehículos
pub const ADMIN_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::SuperAdmin];

/// Roles con acceso a los reportes de uso
pub const REPORT_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::SuperAdmin, UserRole::Approver];

/// Extractor del usuario autenticado a partir del header Authorization
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Please sign in".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;
        debug!("🔐 Token válido para {} ({})", claims.email, claims.role);

        Ok(AuthUser(claims.into()))
    }
}

impl AuthUser {
    /// Falla con 403 si el rol del usuario no está en `roles`
    pub fn require_role(&self, roles: &[UserRole]) -> Result<&AuthenticatedUser, AppError> {
        require_role(&self.0, roles)?;
        Ok(&self.0)
    }
}

pub fn require_role(user: &AuthenticatedUser, roles: &[UserRole]) -> Result<(), AppError> {
    if roles.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Access denied".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role,
            email: "someone@mail.com".to_string(),
        }
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&user(UserRole::Admin), ADMIN_ROLES).is_ok());
        assert!(require_role(&user(UserRole::SuperAdmin), ADMIN_ROLES).is_ok());
        assert!(matches!(
            require_role(&user(UserRole::User), ADMIN_ROLES),
            Err(AppError::Forbidden(_))
        ));
        assert!(require_role(&user(UserRole::Approver), REPORT_ROLES).is_ok());
        assert!(require_role(&user(UserRole::Driver), REPORT_ROLES).is_err());
    }
}
