// Speak-replies-aloud side effect.
//
// Best effort only: a missing binary or failed invocation must not affect
// the transcript or the session loop, so every failure is swallowed after
// a debug log.

use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const SPEECH_COMMAND: &str = "say";
#[cfg(not(target_os = "macos"))]
const SPEECH_COMMAND: &str = "espeak";

/// Read `text` aloud through the platform speech command.
///
/// The command is spawned and left to play on its own; waiting for it
/// would stall the loop until playback finishes.
pub fn speak(text: &str) {
	match Command::new(SPEECH_COMMAND)
		.arg(text)
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.spawn()
	{
		Ok(_child) => {}
		Err(e) => {
			crate::log_debug!("speech output unavailable: {}", e);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_speak_returns_without_waiting() {
		// Must not panic or error even when no speech binary is
		// installed, and must not block on playback when one is
		let start = std::time::Instant::now();
		speak("hello");
		assert!(start.elapsed() < std::time::Duration::from_secs(1));
	}
}
