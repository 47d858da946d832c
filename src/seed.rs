use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::auth::hash_password;
use crate::database::Database;
use crate::error::AppError;
use crate::models::booking::{stay_total, Booking, BookingStatus, CreateBookingRequest};
use crate::models::listing::Listing;
use crate::models::message::CreateMessageRequest;
use crate::models::payment::{CreatePaymentRequest, PaymentMethod};
use crate::models::review::CreateReviewRequest;
use crate::models::user::{CreateUserRequest, User, UserRole};
use crate::validation::Validate;

const USER_COUNT: usize = 10;
const LISTING_COUNT: usize = 10;
const BOOKING_COUNT: usize = 15;
const REVIEW_COUNT: usize = 10;
const MESSAGE_COUNT: usize = 20;

const FIRST_NAMES: &[&str] = &[
    "Amara", "Bruno", "Chiara", "Dainius", "Elif", "Farid", "Greta", "Henrik", "Ines", "Jonas",
    "Katja", "Luca", "Mina", "Noor", "Oskar", "Priya", "Ruben", "Sanna", "Tomas", "Yusuf",
];
const LAST_NAMES: &[&str] = &[
    "Okafor", "Keller", "Lindqvist", "Moreau", "Novak", "Olsen", "Petrov", "Quispe", "Rossi",
    "Santos", "Tanaka", "Ueda", "Vargas", "Weber", "Yilmaz", "Zhang",
];
const CITIES: &[&str] = &[
    "Bergen", "Dubrovnik", "Faro", "Gdansk", "Hoi An", "Innsbruck", "Kyoto", "Lisbon", "Marrakesh",
    "Oaxaca", "Porto", "Reykjavik", "Sevilla", "Tbilisi", "Valparaiso",
];
const NAME_PREFIXES: &[&str] = &[
    "Harborview", "Sunset", "Old Town", "Riverside", "Hilltop", "Garden", "Lantern", "Seabreeze",
    "Cedar", "Stone Bridge",
];
const LISTING_KINDS: &[&str] = &["Loft", "Villa", "Cottage", "Studio", "Bungalow", "Cabin"];
const SENTENCES: &[&str] = &[
    "Five minutes on foot from the market square.",
    "The terrace catches the evening sun.",
    "Freshly renovated kitchen with everything you need.",
    "Quiet street, great breakfast spots around the corner.",
    "Bikes are included for exploring the coast.",
    "Thick stone walls keep it cool in summer.",
    "The ferry stop is right across the road.",
    "Hosts leave a bottle of local wine for arrivals.",
];

fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

pub async fn run(db: &Database) -> Result<(), AppError> {
    let mut rng = StdRng::from_entropy();

    println!("🔄 Seeding database...");

    clear_existing(db).await?;
    println!("✅ Old data cleared");

    let users = create_users(db, &mut rng).await?;
    println!("✅ Created {} users", users.len());

    create_admin(db).await?;
    println!("✅ Created admin user");

    let listings = create_listings(db, &mut rng, &users).await?;
    println!("✅ Created {} listings", listings.len());

    let bookings = create_bookings(db, &mut rng, &users, &listings).await?;
    println!("✅ Created {} bookings", bookings.len());

    let payments = create_payments(db, &mut rng, &bookings).await?;
    println!("✅ Created {payments} payments for confirmed bookings");

    create_reviews(db, &mut rng, &users, &listings).await?;
    println!("✅ Created {REVIEW_COUNT} reviews");

    create_messages(db, &mut rng, &users).await?;
    println!("✅ Created {MESSAGE_COUNT} messages");

    println!("🎉 Seeding complete!");
    Ok(())
}

// Wipe everything except staff accounts, children first.
async fn clear_existing(db: &Database) -> Result<(), AppError> {
    sqlx::query("DELETE FROM messages").execute(db).await?;
    sqlx::query("DELETE FROM reviews").execute(db).await?;
    sqlx::query("DELETE FROM payments").execute(db).await?;
    sqlx::query("DELETE FROM bookings").execute(db).await?;
    sqlx::query("DELETE FROM listings").execute(db).await?;
    sqlx::query("DELETE FROM users WHERE is_staff = FALSE")
        .execute(db)
        .await?;
    Ok(())
}

async fn create_users(db: &Database, rng: &mut StdRng) -> Result<Vec<User>, AppError> {
    // Random guest/host split, but later stages need at least one of each.
    let mut roles: Vec<UserRole> = (0..USER_COUNT)
        .map(|_| {
            if rng.gen_bool(0.5) {
                UserRole::Host
            } else {
                UserRole::Guest
            }
        })
        .collect();
    if !roles.contains(&UserRole::Host) {
        roles[0] = UserRole::Host;
    }
    if !roles.contains(&UserRole::Guest) {
        roles[1] = UserRole::Guest;
    }

    let mut users = Vec::with_capacity(USER_COUNT);
    for (i, role) in roles.into_iter().enumerate() {
        let first_name = pick(rng, FIRST_NAMES);
        let last_name = pick(rng, LAST_NAMES);
        let request = CreateUserRequest {
            email: format!(
                "{}.{}{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase().replace(' ', ""),
                i
            ),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password: "password123".to_string(),
            phone_number: Some(format!("+1-555-{:04}", rng.gen_range(0..10_000u32))),
            role,
        };
        request.validate()?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (user_id, email, first_name, last_name, password_hash, phone_number, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&request.email)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(hash_password(&request.password)?)
        .bind(&request.phone_number)
        .bind(request.role)
        .fetch_one(db)
        .await?;
        users.push(user);
    }
    Ok(users)
}

async fn create_admin(db: &Database) -> Result<(), AppError> {
    // Idempotent: the admin survives the wipe, so a re-run must not collide.
    sqlx::query(
        "INSERT INTO users (user_id, email, first_name, last_name, password_hash, role, is_staff)
         VALUES ($1, $2, $3, $4, $5, $6, TRUE)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind("admin@example.com")
    .bind("Admin")
    .bind("User")
    .bind(hash_password("adminpass")?)
    .bind(UserRole::Admin)
    .execute(db)
    .await?;
    Ok(())
}

async fn create_listings(
    db: &Database,
    rng: &mut StdRng,
    users: &[User],
) -> Result<Vec<Listing>, AppError> {
    let hosts: Vec<&User> = users.iter().filter(|u| u.role == UserRole::Host).collect();

    let mut listings = Vec::with_capacity(LISTING_COUNT);
    for _ in 0..LISTING_COUNT {
        let host = hosts[rng.gen_range(0..hosts.len())];
        let price_cents = rng.gen_range(5_000..=30_000i64);
        let price = BigDecimal::from(price_cents) / BigDecimal::from(100);
        let description = format!("{} {}", pick(rng, SENTENCES), pick(rng, SENTENCES));

        let listing = sqlx::query_as::<_, Listing>(
            "INSERT INTO listings (listing_id, host_id, name, description, location, price_per_night)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(host.user_id)
        .bind(format!(
            "{} {}",
            pick(rng, NAME_PREFIXES),
            pick(rng, LISTING_KINDS)
        ))
        .bind(description)
        .bind(pick(rng, CITIES))
        .bind(price)
        .fetch_one(db)
        .await?;
        listings.push(listing);
    }
    Ok(listings)
}

async fn create_bookings(
    db: &Database,
    rng: &mut StdRng,
    users: &[User],
    listings: &[Listing],
) -> Result<Vec<Booking>, AppError> {
    let guests: Vec<&User> = users.iter().filter(|u| u.role == UserRole::Guest).collect();
    let statuses = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    let mut bookings = Vec::with_capacity(BOOKING_COUNT);
    for _ in 0..BOOKING_COUNT {
        let guest = guests[rng.gen_range(0..guests.len())];
        let listing = &listings[rng.gen_range(0..listings.len())];
        let start_date = Utc::now().date_naive() + Duration::days(rng.gen_range(-30..=30));
        let end_date = start_date + Duration::days(rng.gen_range(1..=5));

        let request = CreateBookingRequest {
            listing_id: listing.listing_id,
            user_id: guest.user_id,
            start_date,
            end_date,
            status: statuses[rng.gen_range(0..statuses.len())],
        };
        request.validate()?;

        let total_price = stay_total(request.start_date, request.end_date, &listing.price_per_night);

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (booking_id, listing_id, user_id, start_date, end_date, total_price, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(request.listing_id)
        .bind(request.user_id)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(total_price)
        .bind(request.status)
        .fetch_one(db)
        .await?;
        bookings.push(booking);
    }
    Ok(bookings)
}

// Only confirmed bookings get a payment record.
async fn create_payments(
    db: &Database,
    rng: &mut StdRng,
    bookings: &[Booking],
) -> Result<usize, AppError> {
    let methods = [
        PaymentMethod::CreditCard,
        PaymentMethod::Paypal,
        PaymentMethod::Stripe,
    ];

    let mut created = 0;
    for booking in bookings {
        if booking.status != BookingStatus::Confirmed {
            continue;
        }
        let request = CreatePaymentRequest {
            booking_id: booking.booking_id,
            amount: booking.total_price.clone(),
            payment_method: methods[rng.gen_range(0..methods.len())],
        };
        request.validate()?;

        sqlx::query(
            "INSERT INTO payments (payment_id, booking_id, amount, payment_method)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(request.booking_id)
        .bind(&request.amount)
        .bind(request.payment_method)
        .execute(db)
        .await?;
        created += 1;
    }
    Ok(created)
}

async fn create_reviews(
    db: &Database,
    rng: &mut StdRng,
    users: &[User],
    listings: &[Listing],
) -> Result<(), AppError> {
    let guests: Vec<&User> = users.iter().filter(|u| u.role == UserRole::Guest).collect();

    for _ in 0..REVIEW_COUNT {
        let request = CreateReviewRequest {
            listing_id: listings[rng.gen_range(0..listings.len())].listing_id,
            user_id: guests[rng.gen_range(0..guests.len())].user_id,
            rating: rng.gen_range(1..=5),
            comment: pick(rng, SENTENCES).to_string(),
        };
        request.validate()?;

        sqlx::query(
            "INSERT INTO reviews (review_id, listing_id, user_id, rating, comment)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(request.listing_id)
        .bind(request.user_id)
        .bind(request.rating)
        .bind(&request.comment)
        .execute(db)
        .await?;
    }
    Ok(())
}

async fn create_messages(db: &Database, rng: &mut StdRng, users: &[User]) -> Result<(), AppError> {
    for _ in 0..MESSAGE_COUNT {
        let sender = &users[rng.gen_range(0..users.len())];
        let recipient = loop {
            let candidate = &users[rng.gen_range(0..users.len())];
            if candidate.user_id != sender.user_id {
                break candidate;
            }
        };

        let request = CreateMessageRequest {
            sender_id: sender.user_id,
            recipient_id: recipient.user_id,
            message_body: format!("{} {}", pick(rng, SENTENCES), pick(rng, SENTENCES)),
        };
        request.validate()?;

        sqlx::query(
            "INSERT INTO messages (message_id, sender_id, recipient_id, message_body)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(request.sender_id)
        .bind(request.recipient_id)
        .bind(&request.message_body)
        .execute(db)
        .await?;
    }
    Ok(())
}
