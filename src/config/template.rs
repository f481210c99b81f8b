// Layered configuration resolution.
//
// Precedence, low to high: built-in defaults < persisted config file
// < environment variables < CLI flags. A source only overrides when it
// carries a non-zero / non-empty value; an explicit zero or empty value is
// treated as "not set". This reproduces the documented behavior of the
// original tool and means a genuine 0.0 temperature or empty stop list
// cannot be expressed through configuration (see README).

use serde::{Deserialize, Serialize};

use super::Config;
use crate::error::StartupError;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const ENV_MODEL: &str = "CONVERSE_MODEL";
const ENV_MAX_TOKENS: &str = "CONVERSE_MAX_TOKENS";
const ENV_TEMPERATURE: &str = "CONVERSE_TEMPERATURE";
const ENV_COMPLETION_COUNT: &str = "CONVERSE_COMPLETION_COUNT";
const ENV_STOP_SEQUENCES: &str = "CONVERSE_STOP_SEQUENCES";
const ENV_SPEAK: &str = "CONVERSE_SPEAK";

/// Resolved, immutable request parameters applied to every gateway call
/// in a session.
///
/// Unset optional fields are omitted from the request body entirely,
/// never transmitted as zero values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestTemplate {
	pub model: String,
	pub max_tokens: Option<u32>,
	pub temperature: Option<f32>,
	pub completion_count: Option<u32>,
	pub stop_sequences: Vec<String>,
	pub speak_replies_aloud: bool,
}

/// One override layer (environment variables or CLI flags).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub model: Option<String>,
	pub max_tokens: Option<u32>,
	pub temperature: Option<f32>,
	pub completion_count: Option<u32>,
	pub stop_sequences: Vec<String>,
	pub speak_replies_aloud: bool,
}

impl Overrides {
	/// Capture the CONVERSE_* environment variables.
	///
	/// Numeric values that fail to parse are treated as unset rather than
	/// fatal, matching the original tool's lookup behavior. Only persisted
	/// file values of the wrong type abort startup.
	pub fn from_env() -> Self {
		Self {
			model: std::env::var(ENV_MODEL).ok(),
			max_tokens: env_parse(ENV_MAX_TOKENS),
			temperature: env_parse(ENV_TEMPERATURE),
			completion_count: env_parse(ENV_COMPLETION_COUNT),
			stop_sequences: std::env::var(ENV_STOP_SEQUENCES)
				.map(|v| {
					v.split(',')
						.map(|s| s.to_string())
						.filter(|s| !s.is_empty())
						.collect()
				})
				.unwrap_or_default(),
			speak_replies_aloud: std::env::var(ENV_SPEAK)
				.map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
				.unwrap_or(false),
		}
	}
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
	std::env::var(name).ok().and_then(|v| v.parse().ok())
}

impl RequestTemplate {
	/// Merge built-in defaults, the persisted config, environment
	/// overrides, and flag overrides into one immutable template.
	///
	/// Resolution itself never fails for missing sources; the only failure
	/// is a resolved temperature outside the accepted range, reported as a
	/// configuration type error before the session loop starts.
	pub fn resolve(
		config: &Config,
		env: &Overrides,
		flags: &Overrides,
	) -> Result<Self, StartupError> {
		let mut template = Self {
			model: DEFAULT_MODEL.to_string(),
			max_tokens: None,
			temperature: None,
			completion_count: None,
			stop_sequences: Vec::new(),
			speak_replies_aloud: false,
		};

		// Persisted file layer: zero/empty fields do not override defaults
		if !config.model.is_empty() {
			template.model = config.model.clone();
		}
		if config.max_tokens > 0 {
			template.max_tokens = Some(config.max_tokens);
		}
		if config.temperature > 0.0 {
			template.temperature = Some(config.temperature);
		}
		if config.completion_count > 0 {
			template.completion_count = Some(config.completion_count);
		}
		if !config.stop_sequences.is_empty() {
			template.stop_sequences = config.stop_sequences.clone();
		}
		if config.speak_replies_aloud {
			template.speak_replies_aloud = true;
		}

		// Environment, then flags: an explicit command-line value wins
		// over ambient shell state
		template.apply(env);
		template.apply(flags);

		if let Some(t) = template.temperature {
			if !(0.0..=2.0).contains(&t) {
				return Err(StartupError::ConfigType(format!(
					"temperature {} is out of range (expected 0.0 to 2.0)",
					t
				)));
			}
		}

		Ok(template)
	}

	fn apply(&mut self, layer: &Overrides) {
		if let Some(model) = &layer.model {
			if !model.is_empty() {
				self.model = model.clone();
			}
		}
		if let Some(v) = layer.max_tokens {
			if v > 0 {
				self.max_tokens = Some(v);
			}
		}
		if let Some(t) = layer.temperature {
			if t > 0.0 {
				self.temperature = Some(t);
			}
		}
		if let Some(n) = layer.completion_count {
			if n > 0 {
				self.completion_count = Some(n);
			}
		}
		if !layer.stop_sequences.is_empty() {
			self.stop_sequences = layer.stop_sequences.clone();
		}
		if layer.speak_replies_aloud {
			self.speak_replies_aloud = true;
		}
	}
}
