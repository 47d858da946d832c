use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::database::Database;
use crate::error::AppError;
use crate::models::listing::{
    CreateListingRequest, Listing, ListingHostRow, ListingResponse, UpdateListingRequest,
};
use crate::models::user::UserPublic;
use crate::validation::Validate;

const LISTING_WITH_HOST: &str = "\
    SELECT l.listing_id, l.host_id, l.name, l.description, l.location, \
           l.price_per_night, l.created_at, l.updated_at, \
           u.email AS host_email, u.first_name AS host_first_name, \
           u.last_name AS host_last_name, u.role AS host_role, \
           u.is_active AS host_is_active, u.is_staff AS host_is_staff \
    FROM listings l \
    JOIN users u ON l.host_id = u.user_id";

#[derive(Debug, Deserialize)]
pub struct ListingFilter {
    pub user_id: Option<Uuid>,
}

// Get all listings, optionally narrowed to a single host via ?user_id=
pub async fn list_listings(
    State(db): State<Database>,
    Query(filter): Query<ListingFilter>,
) -> Result<Json<Value>, AppError> {
    let rows = match filter.user_id {
        Some(host_id) => {
            let sql = format!("{LISTING_WITH_HOST} WHERE l.host_id = $1 ORDER BY l.created_at DESC");
            sqlx::query_as::<_, ListingHostRow>(&sql)
                .bind(host_id)
                .fetch_all(&db)
                .await?
        }
        None => {
            let sql = format!("{LISTING_WITH_HOST} ORDER BY l.created_at DESC");
            sqlx::query_as::<_, ListingHostRow>(&sql).fetch_all(&db).await?
        }
    };

    let listings: Vec<ListingResponse> = rows.into_iter().map(ListingResponse::from).collect();

    Ok(Json(json!({
        "status": "success",
        "data": listings
    })))
}

// Get a single listing with its host expanded
pub async fn get_listing(
    State(db): State<Database>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let sql = format!("{LISTING_WITH_HOST} WHERE l.listing_id = $1");
    let row = sqlx::query_as::<_, ListingHostRow>(&sql)
        .bind(listing_id)
        .fetch_optional(&db)
        .await?
        .ok_or(AppError::NotFound("Listing"))?;

    Ok(Json(json!({
        "status": "success",
        "data": ListingResponse::from(row)
    })))
}

// Create a new listing owned by the authenticated caller
pub async fn create_listing(
    State(db): State<Database>,
    AuthUser(host): AuthUser,
    Json(payload): Json<CreateListingRequest>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let listing_id = Uuid::new_v4();

    // The host is always the caller; any host supplied in the payload was
    // already dropped by the wire format.
    let listing = sqlx::query_as::<_, Listing>(
        "INSERT INTO listings (listing_id, host_id, name, description, location, price_per_night)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(listing_id)
    .bind(host.user_id)
    .bind(payload.name.trim())
    .bind(payload.description.trim())
    .bind(payload.location.trim())
    .bind(&payload.price_per_night)
    .fetch_one(&db)
    .await?;

    let response = ListingResponse::new(listing, UserPublic::from(host));

    Ok(Json(json!({
        "status": "success",
        "message": "Listing created successfully",
        "data": response
    })))
}

// Update a listing; only its host may do so, and ownership never changes
pub async fn update_listing(
    State(db): State<Database>,
    Path(listing_id): Path<Uuid>,
    AuthUser(caller): AuthUser,
    Json(payload): Json<UpdateListingRequest>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let existing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE listing_id = $1")
        .bind(listing_id)
        .fetch_optional(&db)
        .await?
        .ok_or(AppError::NotFound("Listing"))?;

    if existing.host_id != caller.user_id {
        return Err(AppError::Authorization(
            "Only the host may modify this listing.".to_string(),
        ));
    }

    let listing = sqlx::query_as::<_, Listing>(
        "UPDATE listings SET
         name = COALESCE($1, name),
         description = COALESCE($2, description),
         location = COALESCE($3, location),
         price_per_night = COALESCE($4, price_per_night),
         updated_at = NOW()
         WHERE listing_id = $5
         RETURNING *",
    )
    .bind(payload.name.as_deref().map(str::trim))
    .bind(payload.description.as_deref().map(str::trim))
    .bind(payload.location.as_deref().map(str::trim))
    .bind(&payload.price_per_night)
    .bind(listing_id)
    .fetch_one(&db)
    .await?;

    let response = ListingResponse::new(listing, UserPublic::from(caller));

    Ok(Json(json!({
        "status": "success",
        "message": "Listing updated successfully",
        "data": response
    })))
}

// Delete a listing; bookings and reviews referencing it go with it
pub async fn delete_listing(
    State(db): State<Database>,
    Path(listing_id): Path<Uuid>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Value>, AppError> {
    let existing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE listing_id = $1")
        .bind(listing_id)
        .fetch_optional(&db)
        .await?
        .ok_or(AppError::NotFound("Listing"))?;

    if existing.host_id != caller.user_id {
        return Err(AppError::Authorization(
            "Only the host may delete this listing.".to_string(),
        ));
    }

    sqlx::query("DELETE FROM listings WHERE listing_id = $1")
        .bind(listing_id)
        .execute(&db)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Listing deleted successfully"
    })))
}
