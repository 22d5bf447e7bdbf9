// Common module - shared types and utilities across all modules

pub mod clock;
pub mod config;
pub mod error;
pub mod helpers;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod test_support;

// Re-export commonly used types for convenience
pub use clock::{Clock, SystemClock};
pub use config::AppConfig;
pub use error::ApiError;
pub use helpers::safe_email_log;
pub use state::AppState;
pub use validation::{ValidationResult, Validator};
