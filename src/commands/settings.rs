use anyhow::Result;

use converse::config::{Config, Overrides, RequestTemplate};

/// Print the configuration file location and the resolved settings the
/// next session would use.
pub fn run(config: &Config) -> Result<()> {
	match config.path() {
		Some(path) => println!("\n({})\n", path.display()),
		None => println!("\n(no config file)\n"),
	}

	let template = RequestTemplate::resolve(config, &Overrides::from_env(), &Overrides::default())?;

	println!("Name\t Value\t");
	println!("Model\t {}\t", template.model);
	println!("MaxTokens\t {}\t", display_opt(template.max_tokens));
	println!("Temperature\t {}\t", display_opt(template.temperature));
	println!("CompletionCount\t {}\t", display_opt(template.completion_count));
	println!(
		"StopSequences\t {}\t",
		if template.stop_sequences.is_empty() {
			"(none)".to_string()
		} else {
			template.stop_sequences.join(", ")
		}
	);
	println!("SpeakRepliesAloud\t {}\t", template.speak_replies_aloud);
	match &config.api_key {
		Some(key) => println!("ApiKey\t {}\t", "*".repeat(key.len())),
		None => println!("ApiKey\t Not set (will use OPENAI_API_KEY environment variable if available)\t"),
	}
	println!();

	Ok(())
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
	match value {
		Some(v) => v.to_string(),
		None => "(unset)".to_string(),
	}
}
