use travelnest::{database, logger, seed};

// Development data seeder. Run explicitly with `cargo run --bin seed`;
// it wipes all non-staff data before repopulating.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logger::init();

    let pool = database::connect()
        .await
        .expect("failed to connect to PostgreSQL");

    database::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    if let Err(err) = seed::run(&pool).await {
        eprintln!("❌ Seeding failed: {err}");
        std::process::exit(1);
    }
}
