use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;
use crate::validation::{require_non_negative, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    Stripe,
}

/// A payment is a stored fact about a booking. Several payments may exist
/// per booking; their sum is not reconciled against the booking total.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub payment_id: Uuid,
    pub booking_id: Uuid,
    pub amount: BigDecimal,
    pub payment_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub booking_id: Uuid,
    pub amount: BigDecimal,
    pub payment_method: PaymentMethod,
}

impl Validate for CreatePaymentRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_non_negative("amount", &self.amount)?;
        Ok(())
    }
}
