// Session engine: the interactive turn loop.
//
// AwaitingInput -> Requesting -> (Success | Failed) -> AwaitingContinue ->
// {AwaitingInput | Terminated}. A failed gateway call is reported and the
// loop returns straight to input; the user turn that triggered it stays in
// the transcript. Termination is reported to the caller as a
// SessionOutcome, never by exiting the process from in here.

use anyhow::Result;
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::gateway::CompletionGateway;
use super::input::InputProvider;
use super::{speech, SessionOutcome, Transcript, Turn};
use crate::config::RequestTemplate;
use crate::log_error;

const INSTRUCTION_PROMPT: &str = "Type your instruction --> ";
const INSTRUCTION_PLACEHOLDER: &str = "Write a little bit of Wikipedia. What is that?";
const EMPTY_INPUT_MESSAGE: &str = "Please provide a text.";
const EXIT_PROMPT: &str = "Do you want to exit?";

pub struct SessionEngine<'a, G: CompletionGateway, I: InputProvider> {
	template: &'a RequestTemplate,
	gateway: &'a G,
	input: &'a mut I,
	cancel: Arc<AtomicBool>,
	transcript: Transcript,
}

impl<'a, G: CompletionGateway, I: InputProvider> SessionEngine<'a, G, I> {
	pub fn new(
		template: &'a RequestTemplate,
		gateway: &'a G,
		input: &'a mut I,
		cancel: Arc<AtomicBool>,
	) -> Self {
		Self {
			template,
			gateway,
			input,
			cancel,
			transcript: Transcript::new(),
		}
	}

	pub fn transcript(&self) -> &Transcript {
		&self.transcript
	}

	/// Drive the session loop until the user confirms exit.
	///
	/// `initial_instruction` seeds the first turn when the command line
	/// already carried one; otherwise the first instruction is read
	/// interactively like every later one.
	pub async fn run(&mut self, initial_instruction: Option<String>) -> Result<SessionOutcome> {
		let mut pending = initial_instruction
			.map(|s| s.trim().to_string())
			.filter(|s| !s.is_empty());

		loop {
			// Reset the cancel flag before each interaction
			self.cancel.store(false, Ordering::SeqCst);

			let instruction = match pending.take() {
				Some(instruction) => instruction,
				None => self.next_instruction()?,
			};
			self.transcript.push(Turn::user(instruction));

			match self.request_completion().await {
				Ok(content) => {
					self.transcript.push(Turn::assistant(content.clone()));
					println!("\n{}\n", content.bright_green());

					if self.template.speak_replies_aloud {
						speech::speak(&content);
					}

					if self.input.read_confirmation(EXIT_PROMPT)? {
						return Ok(SessionOutcome::UserExit);
					}
				}
				Err(e) => {
					// Non-fatal: the failed turn stays in the transcript and
					// the next instruction is read without asking to exit
					log_error!("{}", e);
				}
			}
		}
	}

	// Re-prompt until the operator provides a non-empty instruction.
	// Empty input is a validation retry, not a failure.
	fn next_instruction(&mut self) -> Result<String> {
		loop {
			let line = self
				.input
				.read_instruction(INSTRUCTION_PROMPT, INSTRUCTION_PLACEHOLDER)?;
			let line = line.trim();
			if !line.is_empty() {
				return Ok(line.to_string());
			}
			println!("{}", EMPTY_INPUT_MESSAGE.yellow());
		}
	}

	// Issue one gateway call with the full transcript, selecting the first
	// candidate. Ctrl+C flips the shared flag and cancels the in-flight
	// request; no timeout is attached here.
	async fn request_completion(&self) -> Result<String> {
		let call = self.gateway.complete(self.template, self.transcript.snapshot());
		tokio::pin!(call);

		let cancel = self.cancel.clone();

		tokio::select! {
			result = &mut call => {
				let candidates = result?;
				let first = candidates
					.into_iter()
					.next()
					.ok_or_else(|| anyhow::anyhow!("Completion returned no candidates"))?;
				if first.content.is_empty() {
					return Err(anyhow::anyhow!("Completion returned an empty reply"));
				}
				Ok(first.content)
			}
			_ = async {
				while !cancel.load(Ordering::SeqCst) {
					tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
				}
			} => {
				Err(anyhow::anyhow!("Request cancelled by user"))
			}
		}
	}
}
