//! HTTP backend for the Spirit11 fantasy-cricket drafting app: user signup and
//! login, and a shared pool of draftable players.

use axum::{routing::{get, post}, Router};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

/// Shared handler state. Cloning is cheap; the pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// bcrypt cost used for new password hashes
    pub hash_cost: u32,
}

impl AppState {
    pub fn new(pool: SqlitePool, hash_cost: u32) -> Self {
        Self { pool, hash_cost }
    }
}

/// Build the full router: API routes, CORS for any origin, request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Spirit11 API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // User endpoints
        .route("/api/signup", post(routes::users::signup))
        .route("/api/login", post(routes::users::login))

        // Player endpoints
        .route(
            "/api/players",
            get(routes::players::get_players).post(routes::players::create_player),
        )

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
