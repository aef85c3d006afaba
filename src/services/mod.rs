//! Services Module
//!
//! Business logic between the HTTP handlers and upstream APIs.

pub mod catalog;
pub mod places;
pub mod tourist;

pub use catalog::Category;
pub use places::PlacesService;
pub use tourist::TouristService;
