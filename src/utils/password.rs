//! Hash de passwords con bcrypt
//! 
//! bcrypt es costoso en CPU, así que se ejecuta fuera del runtime async.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::utils::errors::AppError;

pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST).map_err(AppError::from))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
}

/// `Ok(false)` cuando el password no coincide
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();

    tokio::task::spawn_blocking(move || verify(password, &password_hash).map_err(AppError::from))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hashed = hash_password("123456").await.unwrap();
        assert_ne!(hashed, "123456");
        assert!(verify_password("123456", &hashed).await.unwrap());
        assert!(!verify_password("654321", &hashed).await.unwrap());
    }
}
