use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::user::{UserPublic, UserRole};
use crate::validation::{require_non_negative, require_text, Validate};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub listing_id: Uuid,
    pub host_id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire representation of a listing with its host expanded inline.
#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    pub listing_id: Uuid,
    pub host_id: Uuid,
    pub host: UserPublic,
    pub name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListingResponse {
    pub fn new(listing: Listing, host: UserPublic) -> Self {
        ListingResponse {
            listing_id: listing.listing_id,
            host_id: listing.host_id,
            host,
            name: listing.name,
            description: listing.description,
            location: listing.location,
            price_per_night: listing.price_per_night,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

/// Flat row shape for the listings-join-hosts query.
#[derive(Debug, FromRow)]
pub struct ListingHostRow {
    pub listing_id: Uuid,
    pub host_id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub host_email: String,
    pub host_first_name: String,
    pub host_last_name: String,
    pub host_role: UserRole,
    pub host_is_active: bool,
    pub host_is_staff: bool,
}

impl From<ListingHostRow> for ListingResponse {
    fn from(row: ListingHostRow) -> Self {
        ListingResponse {
            listing_id: row.listing_id,
            host_id: row.host_id,
            host: UserPublic {
                user_id: row.host_id,
                email: row.host_email,
                first_name: row.host_first_name,
                last_name: row.host_last_name,
                role: row.host_role,
                is_active: row.host_is_active,
                is_staff: row.host_is_staff,
            },
            name: row.name,
            description: row.description,
            location: row.location,
            price_per_night: row.price_per_night,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateListingRequest {
    pub name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: BigDecimal,
}

impl Validate for CreateListingRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name, 255)?;
        require_text("description", &self.description, 10_000)?;
        require_text("location", &self.location, 255)?;
        require_non_negative("price_per_night", &self.price_per_night)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListingRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_per_night: Option<BigDecimal>,
}

impl Validate for UpdateListingRequest {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            require_text("name", name, 255)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description, 10_000)?;
        }
        if let Some(location) = &self.location {
            require_text("location", location, 255)?;
        }
        if let Some(price) = &self.price_per_night {
            require_non_negative("price_per_night", price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn create_payload_ignores_read_only_and_host_fields() {
        // Identifier, timestamps and host assignment are server-side; any
        // values supplied in the payload are dropped on deserialization.
        let payload: CreateListingRequest = serde_json::from_value(json!({
            "listing_id": "0a0a0a0a-0a0a-0a0a-0a0a-0a0a0a0a0a0a",
            "host_id": "1b1b1b1b-1b1b-1b1b-1b1b-1b1b1b1b1b1b",
            "created_at": "1999-01-01T00:00:00Z",
            "updated_at": "1999-01-01T00:00:00Z",
            "name": "Harborview Loft",
            "description": "Bright loft above the old harbor.",
            "location": "Bergen",
            "price_per_night": "120.00"
        }))
        .unwrap();

        assert_eq!(payload.name, "Harborview Loft");
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn update_payload_ignores_read_only_fields() {
        let payload: UpdateListingRequest = serde_json::from_value(json!({
            "listing_id": "0a0a0a0a-0a0a-0a0a-0a0a-0a0a0a0a0a0a",
            "updated_at": "1999-01-01T00:00:00Z",
            "name": "Renamed Loft"
        }))
        .unwrap();

        assert_eq!(payload.name.as_deref(), Some("Renamed Loft"));
        assert!(payload.description.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn negative_price_fails_validation() {
        let payload = CreateListingRequest {
            name: "Dockside Cabin".to_string(),
            description: "Two rooms by the water.".to_string(),
            location: "Tromso".to_string(),
            price_per_night: BigDecimal::from_str("-10.00").unwrap(),
        };
        assert!(matches!(payload.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn empty_name_in_update_fails_validation() {
        let payload = UpdateListingRequest {
            name: Some("  ".to_string()),
            ..UpdateListingRequest::default()
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn response_expands_the_host_inline() {
        let row = ListingHostRow {
            listing_id: Uuid::new_v4(),
            host_id: Uuid::new_v4(),
            name: "Harborview Loft".to_string(),
            description: "Bright loft above the old harbor.".to_string(),
            location: "Bergen".to_string(),
            price_per_night: BigDecimal::from_str("120.00").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            host_email: "host@example.com".to_string(),
            host_first_name: "Amara".to_string(),
            host_last_name: "Okafor".to_string(),
            host_role: UserRole::Host,
            host_is_active: true,
            host_is_staff: false,
        };
        let host_id = row.host_id;

        let json = serde_json::to_value(ListingResponse::from(row)).unwrap();
        assert_eq!(json["host_id"], json!(host_id));
        assert_eq!(json["host"]["user_id"], json!(host_id));
        assert_eq!(json["host"]["email"], "host@example.com");
        assert!(json["host"].get("password_hash").is_none());
    }
}
