//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::DatabaseConnection;
use crate::utils::errors::AppResult;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: EnvironmentConfig) -> Self {
        let jwt = JwtConfig::from(&config);
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
            jwt,
        }
    }

    /// Pool compartido; la primera llamada abre la conexión
    pub async fn pool(&self) -> AppResult<PgPool> {
        Ok(self.db.pool().await?.clone())
    }
}
