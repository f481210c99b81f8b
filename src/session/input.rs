// User input handling module

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{CompletionType, Config as RustylineConfig, DefaultEditor, EditMode};
use std::io::{self, Write};

/// Source of operator input: free-text instructions and yes/no
/// confirmations. The engine re-queries until an instruction is non-empty.
pub trait InputProvider {
	fn read_instruction(&mut self, prompt: &str, placeholder: &str) -> Result<String>;
	fn read_confirmation(&mut self, prompt: &str) -> Result<bool>;
}

/// Terminal-backed input provider using rustyline for instruction entry
/// and plain stdin for confirmations.
#[derive(Default)]
pub struct TerminalInput {
	hint_shown: bool,
}

impl TerminalInput {
	pub fn new() -> Self {
		Self::default()
	}
}

impl InputProvider for TerminalInput {
	fn read_instruction(&mut self, prompt: &str, placeholder: &str) -> Result<String> {
		// Configure rustyline
		let config = RustylineConfig::builder()
			.completion_type(CompletionType::List)
			.edit_mode(EditMode::Emacs)
			.auto_add_history(true)
			.bell_style(rustyline::config::BellStyle::None)
			.build();

		let mut editor = DefaultEditor::with_config(config)?;

		// Show the example placeholder once per session
		if !placeholder.is_empty() && !self.hint_shown {
			println!("{}", format!("e.g. {}", placeholder).dimmed());
			self.hint_shown = true;
		}

		match editor.readline(&prompt.bright_blue().to_string()) {
			Ok(line) => {
				let _ = editor.add_history_entry(line.clone());
				Ok(line)
			}
			Err(ReadlineError::Interrupted) => {
				// Ctrl+C: hand back an empty line so the engine re-prompts
				println!("\nCancelled");
				Ok(String::new())
			}
			Err(ReadlineError::Eof) => Err(anyhow::anyhow!("input stream closed")),
			Err(err) => Err(err.into()),
		}
	}

	fn read_confirmation(&mut self, prompt: &str) -> Result<bool> {
		print!("{} [y/N]: ", prompt.bright_cyan());
		io::stdout().flush()?;

		let mut input = String::new();
		io::stdin().read_line(&mut input)?;
		let input = input.trim().to_lowercase();

		Ok(input == "y" || input == "yes")
	}
}
