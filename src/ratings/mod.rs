/// Professor ratings module (third-party provider integration)

mod cache;
mod client;
mod error;
mod types;

pub use cache::{CacheStats, CircuitBreaker, QueryKey, TtlCache};
pub use client::{RatingsCacheState, RatingsClient, RatingsConfig};
pub use error::RatingsError;
pub use types::{
    filter_ratings_by_class, sort_ratings, Professor, ProfessorDetails, Rating, RatingSortKey,
};
