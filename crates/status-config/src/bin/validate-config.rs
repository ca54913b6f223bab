//! Configuration validation utility
//!
//! Usage: cargo run --bin validate-config config/status.toml

use std::env;
use std::process;

use status_config::ConfigLoader;

#[tokio::main]
async fn main() {
	let args: Vec<String> = env::args().collect();

	if args.len() != 2 {
		eprintln!("Usage: {} <config-file>", args[0]);
		process::exit(1);
	}

	let config_path = &args[1];

	println!("Validating configuration file: {}", config_path);

	match ConfigLoader::new().with_file(config_path).load().await {
		Ok(config) => {
			println!("✅ Configuration is valid!");
			println!("Hub chain: {}", config.sodax.hub_chain);
			println!("Relayer API: {}", config.sodax.relayer_api_endpoint);
			println!("Solver API: {}", config.sodax.solver_api_endpoint);
			println!("Chains configured: {}", config.chains.len());
			println!("Listen address: {}:{}", config.server.host, config.server.port);
		}
		Err(e) => {
			eprintln!("❌ Configuration validation failed:");
			eprintln!("{}", e);
			process::exit(1);
		}
	}
}
