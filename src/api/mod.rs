//! API Module
//!
//! HTTP handlers and routing for the tourist guide REST API.
//!
//! # Endpoints
//! - `GET /api/tourist/:city` - Live attraction search (Overpass)
//! - `GET /api/tourist/{hotels,attractions,monuments}/:city` - Catalog listings
//! - `GET /api/places/{hotels,attractions,monuments}/:city` - Google Places search
//! - `GET /api/places/photo` / `GET /api/places/details/:place_id`
//! - `POST /api/auth/signup` / `POST /api/auth/signin`
//! - `GET /api/users/me`, `GET|POST /api/users/:id/favorites`
//! - `GET|POST /api/:type/:id/reviews`, `POST /api/reviews`,
//!   `GET /api/reviews/:location`, `GET /api/reviews/user/:user_name`
//! - `GET /api/cache/stats`, `GET /health`

pub mod auth;
pub mod health;
pub mod places;
pub mod reviews;
pub mod routes;
pub mod state;
pub mod tourist;
pub mod users;

pub use auth::{AuthUser, MaybeAuthUser};
pub use routes::create_router;
pub use state::AppState;
