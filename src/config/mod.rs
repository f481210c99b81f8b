use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub mod loading;
pub mod template;

pub use template::{Overrides, RequestTemplate, DEFAULT_MODEL};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum LogLevel {
	#[serde(rename = "none")]
	None,
	#[serde(rename = "info")]
	Info,
	#[serde(rename = "debug")]
	Debug,
}

impl Default for LogLevel {
	fn default() -> Self {
		Self::None
	}
}

impl LogLevel {
	/// Check if info logging is enabled
	pub fn is_info_enabled(&self) -> bool {
		matches!(self, LogLevel::Info | LogLevel::Debug)
	}

	/// Check if debug logging is enabled
	pub fn is_debug_enabled(&self) -> bool {
		matches!(self, LogLevel::Debug)
	}
}

/// Persisted configuration as stored in the TOML config file.
///
/// Numeric fields default to zero and string fields to empty; a zero or
/// empty value is treated as "not set" during resolution and never
/// overrides a lower-precedence default. See `RequestTemplate::resolve`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
	#[serde(default)]
	pub log_level: LogLevel,

	/// API key for the completion service. The OPENAI_API_KEY environment
	/// variable takes precedence over this field.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,

	#[serde(default)]
	pub model: String,
	#[serde(default)]
	pub max_tokens: u32,
	#[serde(default)]
	pub temperature: f32,
	#[serde(default)]
	pub completion_count: u32,
	#[serde(default)]
	pub stop_sequences: Vec<String>,
	#[serde(default)]
	pub speak_replies_aloud: bool,

	#[serde(skip)]
	config_path: Option<PathBuf>,
}

impl Config {
	/// Path of the file this configuration was loaded from (or would be
	/// saved to), once known.
	pub fn path(&self) -> Option<&Path> {
		self.config_path.as_deref()
	}
}

// Logging macros with a thread-local log level. Only the log level is
// ambient; request parameters always travel through an explicit
// RequestTemplate.

thread_local! {
	static LOG_LEVEL: RefCell<LogLevel> = const { RefCell::new(LogLevel::None) };
}

/// Set the log level for the current thread (used by the logging macros)
pub fn set_thread_log_level(level: LogLevel) {
	LOG_LEVEL.with(|l| {
		*l.borrow_mut() = level;
	});
}

/// Get the log level for the current thread
pub fn thread_log_level() -> LogLevel {
	LOG_LEVEL.with(|l| l.borrow().clone())
}

/// Info logging macro with automatic cyan coloring
/// Shows info messages when log level is Info OR Debug
#[macro_export]
macro_rules! log_info {
	($fmt:expr) => {
		if $crate::config::thread_log_level().is_info_enabled() {
			use colored::Colorize;
			println!("{}", $fmt.cyan());
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if $crate::config::thread_log_level().is_info_enabled() {
			use colored::Colorize;
			println!("{}", format!($fmt, $($arg),*).cyan());
		}
	};
}

/// Debug logging macro with automatic bright blue coloring
#[macro_export]
macro_rules! log_debug {
	($fmt:expr) => {
		if $crate::config::thread_log_level().is_debug_enabled() {
			use colored::Colorize;
			println!("{}", $fmt.bright_blue());
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if $crate::config::thread_log_level().is_debug_enabled() {
			use colored::Colorize;
			println!("{}", format!($fmt, $($arg),*).bright_blue());
		}
	};
}

/// Error logging macro with automatic bright red coloring
/// Always visible regardless of log level (errors should always be shown)
#[macro_export]
macro_rules! log_error {
	($fmt:expr) => {{
		use colored::Colorize;
		eprintln!("{}", $fmt.bright_red());
	}};
	($fmt:expr, $($arg:expr),*) => {{
		use colored::Colorize;
		eprintln!("{}", format!($fmt, $($arg),*).bright_red());
	}};
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_config_parses_to_defaults() {
		let config: Config = toml::from_str("").unwrap();
		assert_eq!(config.log_level, LogLevel::None);
		assert!(config.model.is_empty());
		assert_eq!(config.max_tokens, 0);
		assert_eq!(config.temperature, 0.0);
		assert_eq!(config.completion_count, 0);
		assert!(config.stop_sequences.is_empty());
		assert!(!config.speak_replies_aloud);
		assert!(config.api_key.is_none());
	}

	#[test]
	fn test_log_level_rename() {
		let config: Config = toml::from_str("log_level = \"debug\"").unwrap();
		assert_eq!(config.log_level, LogLevel::Debug);
		assert!(config.log_level.is_info_enabled());
		assert!(config.log_level.is_debug_enabled());
	}

	#[test]
	fn test_config_path_is_not_serialized() {
		let config = Config::default();
		let toml_str = toml::to_string(&config).unwrap();
		assert!(!toml_str.contains("config_path"));
	}
}
