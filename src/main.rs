mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::PromptArgs;
use converse::config::Config;
use converse::log_error;
use converse::session::SessionOutcome;

#[derive(Parser)]
#[command(name = "converse")]
#[command(version)]
#[command(about = "Interactive client for chat completion models")]
struct Cli {
	/// Config file (default: <data dir>/converse/config/config.toml)
	#[arg(long, short, global = true, value_name = "FILE")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Start an interactive session with the completion service
	Prompt(PromptArgs),

	/// Print the current settings
	Settings,

	/// Print name, version, and license information
	About,

	/// Generate a default configuration file
	Config,
}

#[tokio::main]
async fn main() {
	let cli = Cli::parse();

	// Fatal configuration problems abort before any prompt is shown
	let config = match Config::load(cli.config.as_deref()) {
		Ok(config) => config,
		Err(e) => {
			log_error!("{}", e);
			std::process::exit(1);
		}
	};
	converse::config::set_thread_log_level(config.log_level.clone());

	match &cli.command {
		Commands::About => commands::about::run(),
		Commands::Settings => {
			if let Err(e) = commands::settings::run(&config) {
				log_error!("{}", e);
				std::process::exit(1);
			}
		}
		Commands::Config => {
			if let Err(e) = commands::config::run() {
				log_error!("{}", e);
				std::process::exit(1);
			}
		}
		Commands::Prompt(args) => match commands::prompt::run(args, &config).await {
			// User-requested exit reports status 1, same as fatal startup
			// errors; inherited behavior, documented in the README
			Ok(SessionOutcome::UserExit) => std::process::exit(1),
			Err(e) => {
				log_error!("{}", e);
				std::process::exit(1);
			}
		},
	}
}
