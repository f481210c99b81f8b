// Completion gateway abstraction

use anyhow::Result;

use super::Turn;
use crate::config::RequestTemplate;

pub mod openai;

pub use openai::OpenAiGateway;

/// One candidate reply returned by the completion service. The engine
/// always takes the first candidate, even when several were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
	pub role: String,
	pub content: String,
}

/// The chat/completion transport the session engine calls.
///
/// On success at least one candidate is returned. Errors are opaque to the
/// engine: transport, auth, and rate-limit failures are indistinguishable
/// and all handled identically (printed, loop continues).
#[async_trait::async_trait]
pub trait CompletionGateway: Send + Sync {
	async fn complete(
		&self,
		template: &RequestTemplate,
		transcript: &[Turn],
	) -> Result<Vec<Candidate>>;
}
