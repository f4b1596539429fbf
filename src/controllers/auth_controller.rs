use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{
    CreateSuperAdminRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    RegisteredUser,
};
use crate::models::user::{Gender, NewUser, UserRole};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::{normalize_email, parse_optional_date};

pub struct AuthController {
    users: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Registro público: el rol siempre es `user`
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AppError> {
        request.validate()?;

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
                role: UserRole::User,
            })
            .await?;

        info!("👤 Usuario registrado: {}", user.email);

        Ok(RegisterResponse {
            message: "Registration successful".to_string(),
            user: RegisteredUser {
                email: user.email,
                first_name: Some(user.first_name),
                last_name: Some(user.last_name),
                role: user.role,
            },
        })
    }

    pub async fn login(&self, request: LoginRequest, jwt: &JwtConfig) -> Result<LoginResponse, AppError> {
        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let email = normalize_email(&request.email);
        let user = self.users.find_by_email(&email).await?.ok_or_else(invalid)?;

        if !verify_password(&request.password, &user.password_hash).await? {
            warn!("🔒 Password incorrecto para {}", email);
            return Err(invalid());
        }

        let token = generate_token(&user, jwt)?;
        info!("🔑 Login correcto: {} ({})", user.email, user.role);

        Ok(LoginResponse { token })
    }

    /// Crea el super admin por defecto. Requiere la clave configurada en
    /// `SUPER_ADMIN_SECRET_KEY`; sin clave configurada siempre se rechaza.
    pub async fn create_super_admin(
        &self,
        request: CreateSuperAdminRequest,
        config: &EnvironmentConfig,
    ) -> Result<RegisterResponse, AppError> {
        let authorized = matches!(
            (&config.super_admin_secret_key, &request.secret_key),
            (Some(expected), Some(given)) if expected == given
        );
        if !authorized {
            return Err(AppError::Forbidden("Not allowed to create a super admin".to_string()));
        }

        if self.users.role_exists(UserRole::SuperAdmin).await? {
            return Err(AppError::BadRequest("A super admin already exists".to_string()));
        }

        let password_hash = hash_password(&config.super_admin_password).await?;
        let user = self
            .users
            .create(NewUser {
                first_name: "Super".to_string(),
                last_name: "Admin".to_string(),
                gender: Gender::Male,
                birth_date: Some(Utc::now().date_naive()),
                email: normalize_email(&config.super_admin_email),
                phone_number: "0000000000".to_string(),
                position: "Super Administrator".to_string(),
                department: "System Administration".to_string(),
                password_hash,
                role: UserRole::SuperAdmin,
            })
            .await?;

        info!("👑 Super admin creado: {}", user.email);

        Ok(RegisterResponse {
            message: "Super admin created".to_string(),
            user: RegisteredUser {
                email: user.email,
                first_name: None,
                last_name: None,
                role: user.role,
            },
        })
    }
}
