//! Application State
//!
//! Services and repositories shared by every handler.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::{FavoriteRepository, ReviewRepository, UserRepository};
use crate::http::{FetchError, UpstreamClient};
use crate::services::{PlacesService, TouristService};

/// Application state shared across all handlers.
///
/// Built once at startup and dropped at shutdown; the response caches live
/// exactly as long as the state that owns them.
#[derive(Clone)]
pub struct AppState {
    pub tourist: Arc<TouristService>,
    pub places: Arc<PlacesService>,
    pub users: UserRepository,
    pub reviews: ReviewRepository,
    pub favorites: FavoriteRepository,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl AppState {
    /// Creates a new AppState from already constructed services.
    pub fn new(tourist: TouristService, places: PlacesService, pool: SqlitePool) -> Self {
        Self {
            tourist: Arc::new(tourist),
            places: Arc::new(places),
            users: UserRepository::new(pool.clone()),
            reviews: ReviewRepository::new(pool.clone()),
            favorites: FavoriteRepository::new(pool),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Creates a new AppState from configuration with empty caches.
    pub fn from_config(config: &Config, pool: SqlitePool) -> Result<Self, FetchError> {
        let overpass = UpstreamClient::new(config.overpass_client())?;
        let places = UpstreamClient::new(config.places_client())?;

        let mut state = Self::new(
            TouristService::new(overpass),
            PlacesService::new(places, config.google_api_key.clone()),
            pool,
        );
        state.bcrypt_cost = config.bcrypt_cost;
        Ok(state)
    }
}
