//! Data models
//!
//! Persisted entities plus the DTOs used for serializing/deserializing
//! HTTP request and response bodies.

pub mod entities;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use entities::{Favorite, Review, User};
pub use requests::{
    CreateLocationReviewRequest, CreateReviewRequest, FavoriteQuery, PhotoQuery, SigninRequest,
    SignupRequest,
};
pub use responses::{
    CacheStatsResponse, CreatedResponse, HealthResponse, LocationReviewsResponse, UserResponse,
};
