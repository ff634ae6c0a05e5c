//! Business logic services for the shelf-life prediction server

pub mod advisor;
pub mod prediction;

pub use advisor::AdvisorService;
pub use prediction::PredictionService;
