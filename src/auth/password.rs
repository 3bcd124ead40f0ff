//! bcrypt hashing on the blocking pool.

use crate::error::AppError;
use tokio::task;

pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("hash task: {}", e)))?
        .map_err(|e| AppError::Internal(format!("hash: {}", e)))
}

/// Compare a submitted password with a stored hash. A stored value that is not a
/// bcrypt hash never matches.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let outcome = task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verify task: {}", e)))?;
    match outcome {
        Ok(matched) => Ok(matched),
        Err(e) => {
            tracing::warn!(error = %e, "stored password is not a valid bcrypt hash");
            Ok(false)
        }
    }
}
