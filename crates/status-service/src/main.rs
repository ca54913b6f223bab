use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use status_chains::{RpcClient, RpcSpokeVerifier};
use status_config::{ConfigLoader, StatusConfig};
use status_core::StatusOrchestratorBuilder;
use status_relay::{HttpRelayClient, HttpSolverClient};
use status_types::{ChainInfo, StatusRequest};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

mod server;
mod telemetry;
mod viewer;

#[derive(Parser)]
#[command(name = "sodax-status")]
#[command(about = "Sodax cross-chain intent status service", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Path to configuration file; built-in defaults are used when omitted
	#[arg(short, long, value_name = "FILE", env = "CONFIG_FILE")]
	config: Option<PathBuf>,

	/// Log level override (trace, debug, info, warn, error)
	#[arg(long, env = "STATUS_LOG_LEVEL")]
	log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the status API server
	Start,
	/// Validate the configuration
	Validate,
	/// Check the status of a transaction against a running server
	Check {
		/// Source transaction hash
		#[arg(long)]
		tx_hash: String,

		/// Source chain id, e.g. "sonic" or "0xa4b1.arbitrum"
		#[arg(long)]
		chain_id: String,

		/// Base URL of the status server
		#[arg(long, default_value = "http://localhost:3000")]
		url: String,
	},
	/// List the supported source chains
	Chains,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let config = load_config(&cli).await?;

	let log_level = cli
		.log_level
		.clone()
		.unwrap_or_else(|| config.server.log_level.clone());
	telemetry::setup_tracing(&log_level, config.server.log_format)?;

	match cli.command {
		Some(Commands::Start) | None => start_service(config).await,
		Some(Commands::Validate) => validate_config(&config),
		Some(Commands::Check {
			tx_hash,
			chain_id,
			url,
		}) => check_status(&url, tx_hash, chain_id).await,
		Some(Commands::Chains) => {
			print!("{}", viewer::render_chains(&ChainInfo::list(&config.chains)));
			Ok(())
		}
	}
}

async fn load_config(cli: &Cli) -> Result<StatusConfig> {
	let mut loader = ConfigLoader::new();
	if let Some(path) = &cli.config {
		loader = loader.with_file(path);
	}

	loader.load().await.context("Failed to load configuration")
}

async fn start_service(config: StatusConfig) -> Result<()> {
	info!("Starting Sodax status service");
	info!("Hub chain: {}", config.sodax.hub_chain);
	info!("Relayer API: {}", config.sodax.relayer_api_endpoint);
	info!("Solver API: {}", config.sodax.solver_api_endpoint);

	let request_timeout = config.sodax.request_timeout();

	let rpc = RpcClient::new(request_timeout)
		.context("Failed to create RPC client")?
		.with_max_retries(config.sodax.rpc_max_retries);
	let relay = HttpRelayClient::new(config.sodax.relayer_api_endpoint.clone(), request_timeout)
		.context("Failed to create relay client")?
		.with_poll_interval(config.sodax.poll_interval());
	let solver = HttpSolverClient::new(config.sodax.solver_api_endpoint.clone(), request_timeout)
		.context("Failed to create solver client")?;

	let orchestrator = StatusOrchestratorBuilder::new(&config)
		.with_verifier(Arc::new(RpcSpokeVerifier::new(rpc)))
		.with_relay(Arc::new(relay))
		.with_solver(Arc::new(solver))
		.build()
		.context("Failed to build status orchestrator")?;

	let app = server::router(Arc::new(orchestrator));

	server::serve(
		app,
		&config.server.host,
		config.server.port,
		setup_shutdown_signal(),
	)
	.await?;

	info!("Sodax status service stopped");
	Ok(())
}

fn validate_config(config: &StatusConfig) -> Result<()> {
	info!("Configuration is valid");
	info!("Hub chain: {}", config.sodax.hub_chain);
	info!("Listen address: {}:{}", config.server.host, config.server.port);
	info!(
		"Intent execution timeout: {}ms",
		config.sodax.intent_execution_timeout_ms
	);
	info!("Chains:");

	for chain in ChainInfo::list(&config.chains) {
		info!("  {} ({}, {})", chain.id, chain.name, chain.kind);
	}

	Ok(())
}

async fn check_status(url: &str, tx_hash: String, chain_id: String) -> Result<()> {
	let viewer = viewer::StatusViewer::new(url, viewer::DEFAULT_VIEWER_TIMEOUT)?;

	println!("Checking {} on {}...", tx_hash, chain_id);
	let state = viewer
		.fetch(&StatusRequest::new(tx_hash, chain_id))
		.await?;
	print!("{}", viewer::render(&state));

	Ok(())
}

async fn setup_shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = signal::ctrl_c().await {
			error!("Failed to listen for Ctrl+C: {}", e);
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut sigterm) => {
				sigterm.recv().await;
			}
			Err(e) => {
				error!("Failed to install SIGTERM handler: {}", e);
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	info!("Shutdown signal received, draining connections");
}
