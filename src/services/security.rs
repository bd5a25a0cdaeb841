use crate::error::{AppError, Result};

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Fresh opaque session identifier, used as the cookie value
pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Lowercased, trimmed email used for lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
