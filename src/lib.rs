// Main lib.rs file that exports our modules
pub mod config;
pub mod directories;
pub mod error;
pub mod session;

// Re-export commonly used items for convenience
pub use config::{Config, RequestTemplate};
pub use error::StartupError;
