//! HTTP handlers

pub mod advisor;
pub mod health;
pub mod prediction;

pub use advisor::*;
pub use health::*;
pub use prediction::*;
