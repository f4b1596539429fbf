//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Se construye una sola vez al arrancar y se pasa explícitamente al estado.

use std::env;

use thiserror::Error;

use super::database::DatabaseConfig;

/// Error al leer la configuración del entorno
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub database: DatabaseConfig,
    // Bootstrap del super admin
    pub super_admin_secret_key: Option<String>,
    pub super_admin_email: String,
    pub super_admin_password: String,
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let port = parse_or(&lookup, "PORT", 3000u16)?;
        let jwt_expiration = parse_or(&lookup, "JWT_EXPIRATION", 86_400u64)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let mut database = DatabaseConfig::new(database_url);
        database.max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", database.max_connections)?;
        database.min_connections = parse_or(&lookup, "DB_MIN_CONNECTIONS", database.min_connections)?;

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            jwt_secret,
            jwt_expiration,
            cors_origins,
            database,
            super_admin_secret_key: lookup("SUPER_ADMIN_SECRET_KEY").filter(|v| !v.is_empty()),
            super_admin_email: lookup("SUPER_ADMIN_EMAIL")
                .unwrap_or_else(|| "superadmin@mail.com".to_string()),
            super_admin_password: lookup("SUPER_ADMIN_PASSWORD")
                .unwrap_or_else(|| "123456".to_string()),
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            name,
            value: raw,
        }),
        None => Ok(default),
    }
}
