use bigdecimal::BigDecimal;

use crate::error::AppError;

/// Field-level validation applied to every incoming payload before any
/// persistence attempt.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty.")));
    }
    if value.len() > max_len {
        return Err(AppError::Validation(format!(
            "{field} cannot exceed {max_len} characters."
        )));
    }
    Ok(())
}

pub fn require_email(field: &str, value: &str) -> Result<(), AppError> {
    require_text(field, value, 254)?;
    if !value.contains('@') {
        return Err(AppError::Validation(format!(
            "{field} is not a valid email address."
        )));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: &BigDecimal) -> Result<(), AppError> {
    if *value < BigDecimal::from(0) {
        return Err(AppError::Validation(format!("{field} cannot be negative.")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn empty_text_is_rejected() {
        assert!(require_text("name", "   ", 255).is_err());
        assert!(require_text("name", "Harborview Loft", 255).is_ok());
    }

    #[test]
    fn over_length_text_is_rejected() {
        let long = "x".repeat(256);
        assert!(require_text("name", &long, 255).is_err());
    }

    #[test]
    fn email_needs_an_at_sign() {
        assert!(require_email("email", "not-an-address").is_err());
        assert!(require_email("email", "host@example.com").is_ok());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let negative = BigDecimal::from_str("-1.00").unwrap();
        let zero = BigDecimal::from(0);
        assert!(require_non_negative("price_per_night", &negative).is_err());
        assert!(require_non_negative("price_per_night", &zero).is_ok());
    }
}
