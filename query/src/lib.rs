pub mod engine;

pub use engine::{QueryError, RecommendationEngine};
