//! Domain models for shelf-life prediction

mod inference;
mod prediction;
mod request;
mod weather;

pub use inference::*;
pub use prediction::*;
pub use request::*;
pub use weather::*;
