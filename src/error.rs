use thiserror::Error;

/// Errors that abort the process before the session loop is entered.
///
/// Everything else is handled inside the loop: gateway failures are printed
/// and the loop re-prompts, empty input is retried locally, and speech-output
/// failures are swallowed entirely.
#[derive(Debug, Error)]
pub enum StartupError {
	#[error("API key not found. Set OPENAI_API_KEY or the api_key field in the config file")]
	MissingCredential,

	#[error("invalid configuration: {0}")]
	ConfigType(String),
}
