// Directory utilities for cross-platform data directory management

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the system-wide data directory for converse
///
/// - macOS/Linux: ~/.local/share/converse
/// - Windows: %LOCALAPPDATA%/converse
pub fn get_converse_data_dir() -> Result<PathBuf> {
	let data_dir = match dirs::home_dir() {
		Some(home) => {
			#[cfg(target_os = "windows")]
			let path = {
				match dirs::data_local_dir() {
					Some(dir) => dir.join("converse"),
					None => home.join("AppData").join("Local").join("converse"),
				}
			};

			#[cfg(not(target_os = "windows"))]
			let path = home.join(".local").join("share").join("converse");

			path
		}
		None => {
			return Err(anyhow::anyhow!("Unable to determine home directory"));
		}
	};

	if !data_dir.exists() {
		fs::create_dir_all(&data_dir).context(format!(
			"Failed to create converse data directory: {}",
			data_dir.display()
		))?;
	}

	Ok(data_dir)
}

/// Get the configuration directory path
pub fn get_config_dir() -> Result<PathBuf> {
	let data_dir = get_converse_data_dir()?;
	let config_dir = data_dir.join("config");

	if !config_dir.exists() {
		fs::create_dir_all(&config_dir)?;
	}

	Ok(config_dir)
}

/// Get the default configuration file path
pub fn get_config_file_path() -> Result<PathBuf> {
	let config_dir = get_config_dir()?;
	Ok(config_dir.join("config.toml"))
}
