//! External API integrations

pub mod inference;
pub mod weather;

pub use inference::InferenceClient;
pub use weather::WeatherClient;
