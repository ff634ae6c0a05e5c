//! Shared types and the shelf-life prediction engine
//!
//! This crate contains the request/result models and every pure computation,
//! shared between the backend server and the browser (via WASM).

pub mod engine;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use engine::*;
pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
