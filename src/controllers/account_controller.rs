use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::{UpdateAccountRequest, UserResponse};
use crate::models::user::UserChanges;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{normalize_email, parse_optional_date};

use super::user_controller::new_password_hash;

pub struct AccountController {
    users: UserRepository,
}

impl AccountController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found_error("User", &user_id.to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// Edición del perfil propio. El rol no se puede cambiar desde aquí.
    pub async fn update(
        &self,
        user_id: Uuid,
        request: UpdateAccountRequest,
    ) -> Result<UserResponse, AppError> {
        request.validate()?;

        let email = request.email.as_deref().map(normalize_email);
        if let Some(email) = &email {
            if self.users.email_exists(email, Some(user_id)).await? {
                return Err(AppError::BadRequest("Email is already in use".to_string()));
            }
        }

        let changes = UserChanges {
            first_name: request.first_name,
            last_name: request.last_name,
            gender: request.gender,
            birth_date: parse_optional_date("birthDate", request.birth_date.as_deref())?,
            email,
            phone_number: request.phone_number,
            position: request.position,
            department: request.department,
            password_hash: new_password_hash(request.password.as_deref()).await?,
            role: None,
        };

        let user = self
            .users
            .update(user_id, changes)
            .await?
            .ok_or_else(|| not_found_error("User", &user_id.to_string()))?;

        info!("✏️ Cuenta actualizada: {}", user.email);
        Ok(UserResponse::from(user))
    }
}
