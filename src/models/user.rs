use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;
use crate::validation::{require_email, require_text, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Guest,
    Host,
    Admin,
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

/// Wire representation of a user. The password hash and phone number never
/// leave the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_staff: bool,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        UserPublic {
            user_id: user.user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_active: user.is_active,
            is_staff: user.is_staff,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Guest
    }
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_email("email", &self.email)?;
        require_text("first_name", &self.first_name, 150)?;
        require_text("last_name", &self.last_name, 150)?;
        if self.password.len() < 6 {
            return Err(AppError::Validation(
                "password must be at least 6 characters.".to_string(),
            ));
        }
        if let Some(phone) = &self.phone_number {
            require_text("phone_number", phone, 20)?;
        }
        Ok(())
    }
}
