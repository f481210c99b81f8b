use anyhow::Result;
use clap::Args;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use converse::config::{Config, Overrides, RequestTemplate};
use converse::session::{OpenAiGateway, SessionEngine, SessionOutcome, TerminalInput};
use converse::StartupError;

const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Args, Debug)]
pub struct PromptArgs {
	/// Instruction to send as the first turn (prompts interactively when omitted)
	#[arg(value_name = "INSTRUCTION", trailing_var_arg = true)]
	pub instruction: Vec<String>,

	/// Model to request (runtime only, not saved)
	#[arg(long)]
	pub model: Option<String>,

	/// Cap on generated reply length
	#[arg(long)]
	pub max_tokens: Option<u32>,

	/// Sampling temperature (0.0 to 2.0; only applied when > 0)
	#[arg(long)]
	pub temperature: Option<f32>,

	/// Number of candidate replies to request (the first one is shown)
	#[arg(long)]
	pub completion_count: Option<u32>,

	/// Truncation marker (can be used multiple times)
	#[arg(long = "stop", value_name = "SEQUENCE")]
	pub stop_sequences: Vec<String>,

	/// Read every reply aloud through the platform speech command
	#[arg(long)]
	pub speak: bool,
}

impl PromptArgs {
	fn overrides(&self) -> Overrides {
		Overrides {
			model: self.model.clone(),
			max_tokens: self.max_tokens,
			temperature: self.temperature,
			completion_count: self.completion_count,
			stop_sequences: self.stop_sequences.clone(),
			speak_replies_aloud: self.speak,
		}
	}
}

/// Run one interactive session and report how it ended.
pub async fn run(args: &PromptArgs, config: &Config) -> Result<SessionOutcome> {
	let template = RequestTemplate::resolve(config, &Overrides::from_env(), &args.overrides())?;
	converse::log_info!("Using model {}", template.model);

	// Credential precondition, checked exactly once before any prompt
	let api_key = select_api_key(std::env::var(OPENAI_API_KEY_ENV).ok(), config)?;

	let gateway = OpenAiGateway::new(api_key);
	let mut input = TerminalInput::new();

	// Ctrl+C cancels an in-flight request instead of killing the process
	let cancel = Arc::new(AtomicBool::new(false));
	let cancel_clone = cancel.clone();
	ctrlc::set_handler(move || {
		cancel_clone.store(true, Ordering::SeqCst);
	})?;

	let initial = if args.instruction.is_empty() {
		None
	} else {
		Some(args.instruction.join(" "))
	};

	let mut engine = SessionEngine::new(&template, &gateway, &mut input, cancel);
	engine.run(initial).await
}

fn select_api_key(env_key: Option<String>, config: &Config) -> Result<String, StartupError> {
	if let Some(key) = env_key {
		if !key.is_empty() {
			return Ok(key);
		}
	}
	if let Some(key) = &config.api_key {
		if !key.is_empty() {
			return Ok(key.clone());
		}
	}
	Err(StartupError::MissingCredential)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config_with_key(key: &str) -> Config {
		let mut config = Config::default();
		config.api_key = Some(key.to_string());
		config
	}

	#[test]
	fn test_env_key_wins_over_config() {
		let config = config_with_key("from-file");
		let key = select_api_key(Some("from-env".to_string()), &config).unwrap();
		assert_eq!(key, "from-env");
	}

	#[test]
	fn test_config_key_used_when_env_absent() {
		let config = config_with_key("from-file");
		let key = select_api_key(None, &config).unwrap();
		assert_eq!(key, "from-file");
	}

	#[test]
	fn test_missing_credential_is_fatal() {
		let err = select_api_key(None, &Config::default()).unwrap_err();
		assert!(matches!(err, StartupError::MissingCredential));

		// An empty value counts as missing
		let err = select_api_key(Some(String::new()), &Config::default()).unwrap_err();
		assert!(matches!(err, StartupError::MissingCredential));
	}
}
