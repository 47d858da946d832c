use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::database::Database;
use crate::error::AppError;
use crate::models::user::User;

/// The caller's resolved identity. Authentication itself happens upstream;
/// the gateway forwards the verified user id in the `X-User-Id` header and
/// this extractor resolves it to an active account.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<Database> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, db: &Database) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;

        let user_id = Uuid::parse_str(header).map_err(|_| AppError::Unauthenticated)?;

        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1 AND is_active = TRUE")
                .bind(user_id)
                .fetch_optional(db)
                .await?
                .ok_or(AppError::Unauthenticated)?;

        Ok(AuthUser(user))
    }
}

/// Hash a password with Argon2id. Only the PHC-formatted hash is ever stored.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AppError::Internal(format!("password hashing failed: {err}")))?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_phc_strings_and_never_the_plaintext() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "password123");
        assert!(hash.len() <= 128);
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let first = hash_password("password123").unwrap();
        let second = hash_password("password123").unwrap();
        assert_ne!(first, second);
    }
}
