//! Main entry point for the transaction observer service.
//!
//! This binary wires the observer core to live endpoints: Alloy providers
//! for the configured networks and the HTTP status service for indexing and
//! proxy snapshots. Each subcommand runs one waiter to completion and maps
//! its outcome to the process exit code.

use clap::{Parser, Subcommand};
use observer_chain::implementations::evm::alloy::create_providers;
use observer_chain::ChainService;
use observer_config::Config;
use observer_core::TransactionObserver;
use observer_status::implementations::http::HttpStatus;
use observer_status::StatusService;
use observer_types::{ObserverTimings, TransactionError, TransactionHash};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line arguments for the observer service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

/// Wait operations exposed by the observer.
#[derive(Subcommand, Debug)]
enum Command {
	/// Wait until a broadcast transaction is mined with one confirmation
	Executed {
		/// Chain ID the transaction was broadcast on
		#[arg(long)]
		chain_id: u64,
		/// Transaction hash ("0x"-prefixed hex)
		tx_hash: String,
	},
	/// Wait for the next indexing event of a submission
	Indexing {
		/// Indexing ID correlating the submission to its indexer record
		indexing_id: String,
	},
	/// Wait until a relayed transaction completes
	Proxy {
		/// Proxy action ID of the relayed transaction
		proxy_id: String,
	},
}

/// Main entry point for the observer service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the observer over live chain and status endpoints
/// 5. Runs the requested waiter and reports its outcome
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	// Create env filter with default from args
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	// Load configuration
	let config = Config::from_file(&args.config).await?;
	tracing::info!("Loaded configuration [{}]", config.observer.id);

	let observer = build_observer(&config)?;

	match args.command {
		Command::Executed { chain_id, tx_hash } => {
			let hash: TransactionHash = tx_hash.parse()?;
			match observer.wait_for_executed(chain_id, &hash).await? {
				Ok(()) => println!("executed"),
				Err(error) => report_failure(error),
			}
		}
		Command::Indexing { indexing_id } => {
			match observer.wait_for_next_indexing_event(&indexing_id).await? {
				Ok(event) => println!("indexed={} txHash={}", event.indexed, event.tx_hash),
				Err(error) => report_failure(error),
			}
		}
		Command::Proxy { proxy_id } => {
			match observer.wait_for_proxy_transaction_status(&proxy_id).await? {
				Ok(event) => println!("status={} txHash={}", event.status, event.tx_hash),
				Err(error) => report_failure(error),
			}
		}
	}

	Ok(())
}

/// Builds the observer over the configured networks and status endpoint.
fn build_observer(config: &Config) -> Result<TransactionObserver, Box<dyn std::error::Error>> {
	let providers = create_providers(&config.networks)?;
	let chains = Arc::new(ChainService::new(providers));

	let source = Arc::new(HttpStatus::new(&config.status.endpoint));
	let status = Arc::new(StatusService::new(source, config.polling_interval()));

	let timings = ObserverTimings {
		max_mining_wait: config.max_mining_wait(),
		max_indexing_wait: config.max_indexing_wait(),
	};

	Ok(TransactionObserver::new(chains, status, timings))
}

/// Prints a classified failure and exits non-zero.
fn report_failure(error: TransactionError) -> ! {
	println!("{}", error.reason);
	std::process::exit(1);
}
