//! Tourist Guide - Tourist information backend
//!
//! Serves hotels, attractions and monuments per city from a TTL-cached mix of
//! live upstream APIs and a static catalog, plus accounts, reviews and favorites.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod services;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::AppError;
