use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use dotenvy::dotenv;
use std::env;
use tower_http::cors::{Any, CorsLayer};

use travelnest::database;
use travelnest::logger;
use travelnest::routes::listings::{
    create_listing, delete_listing, get_listing, list_listings, update_listing,
};

#[tokio::main]
async fn main() {
    dotenv().ok();
    logger::init();

    let pool = database::connect()
        .await
        .expect("failed to connect to PostgreSQL");

    database::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    async fn handle_404() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    let app = Router::new()
        .route("/listings", get(list_listings).post(create_listing))
        .route(
            "/listings/:id",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
        .fallback(handle_404)
        .with_state(pool)
        .layer(cors);

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    tracing::info!("server running at http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    axum::serve(listener, app).await.expect("server error");
}
