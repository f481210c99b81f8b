pub mod about;
pub mod config;
pub mod prompt;
pub mod settings;

// Re-export the command argument structs
pub use prompt::PromptArgs;
