use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::models::auth::AuthenticatedUser;
use crate::models::user::{ensure_can_delete, ensure_can_grant_role, NewUser, User, UserChanges, UserRole};
use crate::repositories::driver_license_repository::DriverLicenseRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::password::hash_password;
use crate::utils::validation::{normalize_email, parse_optional_date};

/// Un password vacío o ausente deja el hash actual
pub(crate) async fn new_password_hash(password: Option<&str>) -> Result<Option<String>, AppError> {
    match password.filter(|p| !p.trim().is_empty()) {
        Some(password) => Ok(Some(hash_password(password).await?)),
        None => Ok(None),
    }
}

fn license_expiry(role: UserRole, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    let expiry = parse_optional_date("driverLicenseExpiry", raw)?;
    if role == UserRole::Driver && expiry.is_none() {
        return Err(AppError::BadRequest("Driver license expiry is required".to_string()));
    }
    Ok(expiry)
}

pub struct UserController {
    users: UserRepository,
    licenses: DriverLicenseRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            licenses: DriverLicenseRepository::new(pool),
        }
    }

    /// Listado con la fecha de vencimiento de licencia para los conductores
    pub async fn list(&self, role: Option<UserRole>) -> Result<Vec<UserResponse>, AppError> {
        let users = self.users.list(role).await?;
        self.with_licenses(users).await
    }

    pub async fn list_drivers(&self) -> Result<Vec<UserResponse>, AppError> {
        self.list(Some(UserRole::Driver)).await
    }

    async fn with_licenses(&self, users: Vec<User>) -> Result<Vec<UserResponse>, AppError> {
        let driver_ids: Vec<Uuid> = users
            .iter()
            .filter(|u| u.role == UserRole::Driver)
            .map(|u| u.id)
            .collect();
        let expiries = self.licenses.expiry_by_user(&driver_ids).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let expiry = expiries.get(&user.id).copied();
                UserResponse::from(user).with_license(expiry)
            })
            .collect())
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> Result<UserResponse, AppError> {
        request.validate()?;

        let role = request.role.unwrap_or(UserRole::User);
        ensure_can_grant_role(actor.role, role)?;
        let expiry = license_expiry(role, request.driver_license_expiry.as_deref())?;

        let email = normalize_email(&request.email);
        if self.users.email_exists(&email, None).await? {
            return Err(AppError::BadRequest("Email is already in use".to_string()));
        }

        let birth_date = parse_optional_date("birthDate", request.birth_date.as_deref())?;
        let password_hash = hash_password(&request.password).await?;

        let user = self
            .users
            .create(NewUser {
                first_name: request.first_name,
                last_name: request.last_name,
                gender: request.gender,
                birth_date,
                email,
                phone_number: request.phone_number,
                position: request.position,
                department: request.department,
                password_hash,
                role,
            })
            .await?;

        let expiry = match (user.role, expiry) {
            (UserRole::Driver, Some(date)) => Some(self.licenses.upsert(user.id, date).await?.expiry_date),
            _ => None,
        };

        info!("👤 Usuario creado por {}: {} ({})", actor.email, user.email, user.role);
        Ok(UserResponse::from(user).with_license(expiry))
    }

    /// Edición por un administrador. La licencia se crea o renueva si el
    /// usuario queda como conductor y se borra si deja de serlo.
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        request.validate()?;

        if let Some(role) = request.role {
            ensure_can_grant_role(actor.role, role)?;
        }
        let expiry = match request.role {
            Some(role) => license_expiry(role, request.driver_license_expiry.as_deref())?,
            None => parse_optional_date("driverLicenseExpiry", request.driver_license_expiry.as_deref())?,
        };

        let email = request.email.as_deref().map(normalize_email);
        if let Some(email) = &email {
            if self.users.email_exists(email, Some(request.id)).await? {
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
            role: request.role,
        };

        let user = self
            .users
            .update(request.id, changes)
            .await?
            .ok_or_else(|| not_found_error("User", &request.id.to_string()))?;

        let expiry = if user.role == UserRole::Driver {
            match expiry {
                Some(date) => Some(self.licenses.upsert(user.id, date).await?.expiry_date),
                None => self.licenses.find(user.id).await?.map(|l| l.expiry_date),
            }
        } else {
            self.licenses.delete(user.id).await?;
            None
        };

        info!("✏️ Usuario actualizado por {}: {}", actor.email, user.email);
        Ok(UserResponse::from(user).with_license(expiry))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Option<&str>) -> Result<(), AppError> {
        let raw = id
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::BadRequest("User id is required".to_string()))?;
        let id = Uuid::parse_str(raw)
            .map_err(|_| AppError::BadRequest(format!("Invalid user id '{}'", raw)))?;

        let target = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", raw))?;
        ensure_can_delete(actor.role, target.role)?;

        if !self.users.delete(id).await? {
            return Err(not_found_error("User", raw));
        }

        info!("🗑️ Usuario eliminado por {}: {}", actor.email, target.email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_requires_license_expiry() {
        assert!(matches!(
            license_expiry(UserRole::Driver, None),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            license_expiry(UserRole::Driver, Some("")),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(
            license_expiry(UserRole::Driver, Some("2030-12-31")).unwrap(),
            NaiveDate::from_ymd_opt(2030, 12, 31)
        );
        assert!(license_expiry(UserRole::User, None).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_password_keeps_hash() {
        assert!(new_password_hash(None).await.unwrap().is_none());
        assert!(new_password_hash(Some("   ")).await.unwrap().is_none());
        assert!(new_password_hash(Some("secret1")).await.unwrap().is_some());
    }
}
