use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::user::UserPublic;
use crate::validation::{require_text, Validate};

#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub message_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub message_body: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message_id: Uuid,
    pub sender: UserPublic,
    pub recipient: UserPublic,
    pub message_body: String,
    pub sent_at: DateTime<Utc>,
}

impl MessageResponse {
    pub fn new(message: Message, sender: UserPublic, recipient: UserPublic) -> Self {
        MessageResponse {
            message_id: message.message_id,
            sender,
            recipient,
            message_body: message.message_body,
            sent_at: message.sent_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessageRequest {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub message_body: String,
}

impl Validate for CreateMessageRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("message_body", &self.message_body, 10_000)?;
        if self.sender_id == self.recipient_id {
            return Err(AppError::Validation(
                "sender and recipient must be different users.".to_string(),
            ));
        }
        Ok(())
    }
}
