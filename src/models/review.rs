use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::listing::Listing;
use crate::models::user::UserPublic;
use crate::validation::{require_text, Validate};

#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub review_id: Uuid,
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub review_id: Uuid,
    pub listing: Listing,
    pub user: UserPublic,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewResponse {
    pub fn new(review: Review, listing: Listing, user: UserPublic) -> Self {
        ReviewResponse {
            review_id: review.review_id,
            listing,
            user,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

impl Validate for CreateReviewRequest {
    fn validate(&self) -> Result<(), AppError> {
        if !(1..=5).contains(&self.rating) {
            return Err(AppError::Validation(
                "rating must be between 1 and 5.".to_string(),
            ));
        }
        require_text("comment", &self.comment, 10_000)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_rating(rating: i32) -> CreateReviewRequest {
        CreateReviewRequest {
            listing_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            rating,
            comment: "Quiet street, great breakfast.".to_string(),
        }
    }

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        assert!(matches!(
            request_with_rating(0).validate(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            request_with_rating(6).validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn all_five_allowed_ratings_pass() {
        for rating in 1..=5 {
            assert!(request_with_rating(rating).validate().is_ok());
        }
    }

    #[test]
    fn empty_comment_is_rejected() {
        let mut request = request_with_rating(4);
        request.comment = "  ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn response_expands_listing_and_reviewer() {
        use crate::models::user::UserRole;
        use bigdecimal::BigDecimal;
        use std::str::FromStr;

        let listing = Listing {
            listing_id: Uuid::new_v4(),
            host_id: Uuid::new_v4(),
            name: "Lantern Cottage".to_string(),
            description: "Thick stone walls keep it cool in summer.".to_string(),
            location: "Sevilla".to_string(),
            price_per_night: BigDecimal::from_str("75.00").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let reviewer = UserPublic {
            user_id: Uuid::new_v4(),
            email: "guest@example.com".to_string(),
            first_name: "Mina".to_string(),
            last_name: "Haugen".to_string(),
            role: UserRole::Guest,
            is_active: true,
            is_staff: false,
        };
        let review = Review {
            review_id: Uuid::new_v4(),
            listing_id: listing.listing_id,
            user_id: reviewer.user_id,
            rating: 4,
            comment: "Quiet street, great breakfast.".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(ReviewResponse::new(review, listing, reviewer)).unwrap();

        assert_eq!(json["rating"], 4);
        assert_eq!(json["listing"]["name"], "Lantern Cottage");
        assert_eq!(json["user"]["email"], "guest@example.com");
        assert!(json["user"].get("password_hash").is_none());
    }
}
