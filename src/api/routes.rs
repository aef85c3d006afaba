//! API Routes
//!
//! Configures the Axum router with every endpoint.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{auth, health, places, reviews, tourist, users, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Live Overpass search and catalog listings
        .route("/api/tourist/hotels/:city", get(tourist::hotels_handler))
        .route(
            "/api/tourist/attractions/:city",
            get(tourist::attractions_handler),
        )
        .route("/api/tourist/monuments/:city", get(tourist::monuments_handler))
        .route("/api/tourist/:city", get(tourist::tourist_places_handler))
        // Google Places proxy
        .route("/api/places/hotels/:city", get(places::hotels_handler))
        .route(
            "/api/places/attractions/:city",
            get(places::attractions_handler),
        )
        .route("/api/places/monuments/:city", get(places::monuments_handler))
        .route("/api/places/photo", get(places::photo_handler))
        .route("/api/places/details/:place_id", get(places::details_handler))
        // Accounts
        .route("/api/auth/signup", post(auth::signup_handler))
        .route("/api/auth/signin", post(auth::signin_handler))
        .route("/api/users/me", get(users::me_handler))
        .route(
            "/api/users/:id/favorites",
            get(users::list_favorites_handler).post(users::add_favorite_handler),
        )
        // Reviews
        .route(
            "/api/reviews",
            post(reviews::create_location_review_handler),
        )
        .route(
            "/api/reviews/user/:user_name",
            get(reviews::user_reviews_handler),
        )
        .route("/api/reviews/:location", get(reviews::location_reviews_handler))
        .route(
            "/api/:target_type/:target_id/reviews",
            get(reviews::list_reviews_handler).post(reviews::create_review_handler),
        )
        // Service
        .route("/api/cache/stats", get(health::cache_stats_handler))
        .route("/health", get(health::health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
