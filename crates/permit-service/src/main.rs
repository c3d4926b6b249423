//! Command-line entry point for the permit tooling.
//!
//! `permit sign` produces a signed ERC-2612 permit for the configured owner
//! account; `permit demo` runs the full owner/relayer/spender flow against an
//! in-memory token.

use clap::{Parser, Subcommand};
use permit_config::Config;
use std::path::PathBuf;

mod commands;

use commands::{demo::DemoArgs, sign::SignArgs};

/// Command-line arguments for the permit tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml", env = "PERMIT_CONFIG")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Sign a permit with the configured account and print it as JSON
	Sign(SignArgs),
	/// Run a permit, relay and transfer round trip against an in-memory token
	Demo(DemoArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	// stdout carries the JSON output.
	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();

	let config = Config::from_file(&args.config).await?;
	tracing::info!(
		token = %config.domain.verifying_contract,
		chain_id = config.domain.chain_id,
		"Loaded configuration"
	);

	let output = match args.command {
		Command::Sign(sign_args) => commands::sign::run(&config, &sign_args).await?,
		Command::Demo(demo_args) => commands::demo::run(&config, &demo_args).await?,
	};

	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(())
}
