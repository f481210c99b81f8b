// Session module for interactive chat sessions

pub mod engine;
pub mod gateway;
pub mod input;
pub mod speech;

pub use engine::SessionEngine;
pub use gateway::{Candidate, CompletionGateway, OpenAiGateway};
pub use input::{InputProvider, TerminalInput};

use serde::{Deserialize, Serialize};

/// Originating side of one message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
}

impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::User => "user",
			Role::Assistant => "assistant",
		}
	}
}

/// One message unit in a conversation. Never mutated after creation and
/// never removed within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
	pub role: Role,
	pub content: String,
}

impl Turn {
	pub fn user(content: impl Into<String>) -> Self {
		Self {
			role: Role::User,
			content: content.into(),
		}
	}

	pub fn assistant(content: impl Into<String>) -> Self {
		Self {
			role: Role::Assistant,
			content: content.into(),
		}
	}
}

/// Append-only, ordered transcript of a session. Insertion order defines
/// the context window sent to the gateway on every call.
#[derive(Debug, Default)]
pub struct Transcript {
	turns: Vec<Turn>,
}

impl Transcript {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, turn: Turn) {
		self.turns.push(turn);
	}

	/// The full ordered transcript, reflecting every prior push exactly
	/// once, including turns from failed exchanges.
	pub fn snapshot(&self) -> &[Turn] {
		&self.turns
	}

	pub fn len(&self) -> usize {
		self.turns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.turns.is_empty()
	}
}

/// How a session loop ended, reported to the caller instead of exiting
/// the process from inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
	/// The operator answered the exit confirmation affirmatively.
	UserExit,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_transcript_preserves_insertion_order() {
		let mut transcript = Transcript::new();
		transcript.push(Turn::user("first"));
		transcript.push(Turn::assistant("second"));
		transcript.push(Turn::user("third"));

		let turns = transcript.snapshot();
		assert_eq!(turns.len(), 3);
		assert_eq!(turns[0], Turn::user("first"));
		assert_eq!(turns[1], Turn::assistant("second"));
		assert_eq!(turns[2], Turn::user("third"));
	}

	#[test]
	fn test_role_wire_names() {
		assert_eq!(Role::User.as_str(), "user");
		assert_eq!(Role::Assistant.as_str(), "assistant");
		assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
	}
}
