use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::StartupError;

impl Config {
	/// Load configuration from `path`, or from the system-wide config file
	/// when no path is given.
	///
	/// A missing file is tolerated: defaults are used and the absence is
	/// logged at info level. A file that exists but cannot be read or
	/// parsed is a fatal `ConfigType` error and the caller must abort
	/// before entering the session loop.
	pub fn load(path: Option<&Path>) -> Result<Self, StartupError> {
		let config_path = match path {
			Some(p) => p.to_path_buf(),
			None => crate::directories::get_config_file_path()
				.map_err(|e| StartupError::ConfigType(e.to_string()))?,
		};

		if config_path.exists() {
			let config_str = fs::read_to_string(&config_path).map_err(|e| {
				StartupError::ConfigType(format!(
					"failed to read {}: {}",
					config_path.display(),
					e
				))
			})?;
			let mut config: Config = toml::from_str(&config_str).map_err(|e| {
				StartupError::ConfigType(format!(
					"failed to parse {}: {}",
					config_path.display(),
					e
				))
			})?;

			// Store the config path for display and future saves
			config.config_path = Some(config_path);
			Ok(config)
		} else {
			// Printed unconditionally: the log level lives in the file that
			// is missing, so no level gate can be trusted here
			println!("{}", missing_config_note(&config_path));
			let mut config = Config::default();
			config.config_path = Some(config_path);
			Ok(config)
		}
	}

	/// Write a default configuration file if none exists yet and return
	/// its path.
	pub fn create_default_config() -> Result<PathBuf> {
		let config_path = crate::directories::get_config_file_path()?;

		if !config_path.exists() {
			let config = Config::default();
			let config_str = toml::to_string_pretty(&config)
				.context("Failed to serialize default configuration to TOML")?;

			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent).context(format!(
					"Failed to create config directory: {}",
					parent.display()
				))?;
			}

			fs::write(&config_path, config_str).context(format!(
				"Failed to write default config to {}",
				config_path.display()
			))?;

			println!("Created default configuration at {}", config_path.display());
		}

		Ok(config_path)
	}
}

fn missing_config_note(path: &Path) -> String {
	format!("(config: {} not found, using defaults)", path.display())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::LogLevel;

	#[test]
	fn test_load_existing_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(
			&path,
			r#"
log_level = "info"
model = "gpt-4o"
max_tokens = 256
temperature = 0.4
stop_sequences = ["END"]
"#,
		)
		.unwrap();

		let config = Config::load(Some(&path)).unwrap();
		assert_eq!(config.log_level, LogLevel::Info);
		assert_eq!(config.model, "gpt-4o");
		assert_eq!(config.max_tokens, 256);
		assert_eq!(config.temperature, 0.4);
		assert_eq!(config.stop_sequences, vec!["END".to_string()]);
		assert_eq!(config.path(), Some(path.as_path()));
	}

	#[test]
	fn test_missing_file_is_tolerated() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.toml");

		let config = Config::load(Some(&path)).unwrap();
		assert_eq!(config, Config {
			config_path: Some(path),
			..Default::default()
		});
	}

	#[test]
	fn test_missing_file_note_mentions_path() {
		// The note is emitted on every missing-file load, independent of
		// the thread log level (which cannot be known before loading)
		let note = missing_config_note(Path::new("/tmp/absent/config.toml"));
		assert!(note.contains("/tmp/absent/config.toml"));
		assert!(note.contains("using defaults"));
	}

	#[test]
	fn test_wrong_value_type_is_fatal() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(&path, "temperature = \"hot\"").unwrap();

		let err = Config::load(Some(&path)).unwrap_err();
		assert!(matches!(err, StartupError::ConfigType(_)));
	}
}
