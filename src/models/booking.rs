use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::listing::Listing;
use crate::models::user::UserPublic;
use crate::validation::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub booking_id: Uuid,
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: BigDecimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Wire representation of a booking with its guest and listing expanded one
/// level deep. The nested listing stays flat (host by id only).
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub booking_id: Uuid,
    pub listing: Listing,
    pub user: UserPublic,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: BigDecimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl BookingResponse {
    pub fn new(booking: Booking, listing: Listing, user: UserPublic) -> Self {
        BookingResponse {
            booking_id: booking.booking_id,
            listing,
            user,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_price: booking.total_price,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: BookingStatus,
}

impl Validate for CreateBookingRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.end_date <= self.start_date {
            return Err(AppError::Validation(
                "end_date must be after start_date.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Total price for a stay: nights between the two dates times the nightly
/// rate. Computed once at creation and stored as a fact.
pub fn stay_total(start: NaiveDate, end: NaiveDate, price_per_night: &BigDecimal) -> BigDecimal {
    let nights = (end - start).num_days();
    BigDecimal::from(nights) * price_per_night
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn three_nights_at_one_hundred_totals_three_hundred() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let rate = BigDecimal::from_str("100.00").unwrap();

        let total = stay_total(start, end, &rate);
        assert_eq!(total, BigDecimal::from_str("300.00").unwrap());
    }

    #[test]
    fn single_night_totals_the_nightly_rate() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 11).unwrap();
        let rate = BigDecimal::from_str("87.50").unwrap();

        assert_eq!(stay_total(start, end, &rate), rate);
    }

    #[test]
    fn reversed_dates_fail_validation() {
        let request = CreateBookingRequest {
            listing_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: BookingStatus::Pending,
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn zero_night_stays_fail_validation() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let request = CreateBookingRequest {
            listing_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            start_date: day,
            end_date: day,
            status: BookingStatus::Pending,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn status_defaults_to_pending_on_the_wire() {
        let request: CreateBookingRequest = serde_json::from_value(serde_json::json!({
            "listing_id": Uuid::new_v4(),
            "user_id": Uuid::new_v4(),
            "start_date": "2024-01-01",
            "end_date": "2024-01-04"
        }))
        .unwrap();
        assert_eq!(request.status, BookingStatus::Pending);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_value::<BookingStatus>(serde_json::json!("archived"));
        assert!(result.is_err());
    }

    #[test]
    fn response_nests_guest_and_listing_one_level_deep() {
        use crate::models::user::UserRole;

        let host_id = Uuid::new_v4();
        let listing = Listing {
            listing_id: Uuid::new_v4(),
            host_id,
            name: "Harborview Loft".to_string(),
            description: "Bright loft above the old harbor.".to_string(),
            location: "Bergen".to_string(),
            price_per_night: BigDecimal::from_str("100.00").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let guest = UserPublic {
            user_id: Uuid::new_v4(),
            email: "guest@example.com".to_string(),
            first_name: "Mina".to_string(),
            last_name: "Haugen".to_string(),
            role: UserRole::Guest,
            is_active: true,
            is_staff: false,
        };
        let booking = Booking {
            booking_id: Uuid::new_v4(),
            listing_id: listing.listing_id,
            user_id: guest.user_id,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            total_price: BigDecimal::from_str("300.00").unwrap(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };

        let json =
            serde_json::to_value(BookingResponse::new(booking, listing, guest)).unwrap();

        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["user"]["email"], "guest@example.com");
        // The nested listing keeps its host by id only; expansion stops at
        // one level.
        assert_eq!(json["listing"]["host_id"], serde_json::json!(host_id));
        assert!(json["listing"].get("host").is_none());
        assert!(json["user"].get("password_hash").is_none());
    }
}
