use anyhow::Result;

use converse::config::Config;

/// Write a default configuration file if none exists and print its path.
pub fn run() -> Result<()> {
	let config_path = Config::create_default_config()?;
	println!("Configuration file: {}", config_path.display());
	Ok(())
}
