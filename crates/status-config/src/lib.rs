//! Configuration loading for the status service.
//!
//! Configuration is read from a TOML, JSON or YAML file (chosen by
//! extension), `${VAR}` references are replaced with environment values,
//! prefixed environment variables override individual settings, and the
//! result is validated before use. Without a file the built-in mainnet
//! defaults are used.

pub mod types;

pub use types::*;

use regex::Regex;
use status_types::SpokeChainId;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "STATUS_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<StatusConfig, ConfigError> {
		let mut config = match &self.file_path {
			Some(file_path) => self.load_from_file(file_path).await?,
			None => {
				info!("No configuration file given, using built-in defaults");
				StatusConfig::default()
			}
		};

		self.apply_env_overrides(&mut config)?;
		validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, file_path: &str) -> Result<StatusConfig, ConfigError> {
		if !Path::new(file_path).exists() {
			return Err(ConfigError::FileNotFound(file_path.to_string()));
		}

		info!("Loading configuration from {}", file_path);
		let content = tokio::fs::read_to_string(file_path).await?;
		let substituted = substitute_env_vars(&content)?;

		let extension = Path::new(file_path)
			.extension()
			.and_then(|s| s.to_str())
			.unwrap_or("toml");

		match extension {
			"toml" => toml::from_str(&substituted).map_err(|e| ConfigError::ParseError(e.to_string())),
			"json" => serde_json::from_str(&substituted)
				.map_err(|e| ConfigError::ParseError(e.to_string())),
			"yaml" | "yml" => serde_yaml::from_str(&substituted)
				.map_err(|e| ConfigError::ParseError(e.to_string())),
			other => Err(ConfigError::ParseError(format!(
				"Unsupported config format: {}",
				other
			))),
		}
	}

	fn apply_env_overrides(&self, config: &mut StatusConfig) -> Result<(), ConfigError> {
		if let Some(host) = self.env_var("HOST") {
			config.server.host = host;
		}

		if let Some(port) = self.env_var("PORT") {
			config.server.port = port
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid HTTP port: {}", e)))?;
		}

		if let Some(log_level) = self.env_var("LOG_LEVEL") {
			config.server.log_level = log_level;
		}

		if let Some(url) = self.env_var("RELAYER_API_URL") {
			debug!("Overriding relayer API endpoint from environment");
			config.sodax.relayer_api_endpoint = url;
		}

		if let Some(url) = self.env_var("SOLVER_API_URL") {
			debug!("Overriding solver API endpoint from environment");
			config.sodax.solver_api_endpoint = url;
		}

		if let Some(hub) = self.env_var("HUB_CHAIN") {
			config.sodax.hub_chain = SpokeChainId::new(hub);
		}

		Ok(())
	}

	fn env_var(&self, name: &str) -> Option<String> {
		env::var(format!("{}{}", self.env_prefix, name)).ok()
	}
}

/// Replaces every `${VAR_NAME}` with the value of the environment variable.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::ParseError(e.to_string()))?;
	let mut result = content.to_string();

	for cap in re.captures_iter(content) {
		let full_match = &cap[0];
		let var_name = &cap[1];

		let env_value =
			env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

		result = result.replace(full_match, &env_value);
	}

	Ok(result)
}

pub fn validate_config(config: &StatusConfig) -> Result<(), ConfigError> {
	if !config.chains.contains_key(&config.sodax.hub_chain) {
		return Err(ConfigError::ValidationError(format!(
			"Hub chain '{}' is not configured",
			config.sodax.hub_chain
		)));
	}

	if config.sodax.relayer_api_endpoint.trim().is_empty() {
		return Err(ConfigError::ValidationError(
			"Relayer API endpoint must be set".to_string(),
		));
	}

	if config.sodax.solver_api_endpoint.trim().is_empty() {
		return Err(ConfigError::ValidationError(
			"Solver API endpoint must be set".to_string(),
		));
	}

	if config.sodax.intent_execution_timeout_ms == 0 {
		return Err(ConfigError::ValidationError(
			"Intent execution timeout must be greater than zero".to_string(),
		));
	}

	for (chain_id, chain) in &config.chains {
		if chain.rpc_url.trim().is_empty() {
			return Err(ConfigError::ValidationError(format!(
				"Chain '{}' has no RPC URL",
				chain_id
			)));
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::Builder;

	const MINIMAL: &str = r#"
[server]
port = 8088

[sodax]
hub_chain = "sonic"
relayer_api_endpoint = "http://relay.local"
solver_api_endpoint = "http://solver.local"

[chains.sonic]
name = "Sonic"
rpc_url = "http://sonic.local"
relay_chain_id = 146

[chains."0xa4b1.arbitrum"]
name = "Arbitrum"
rpc_url = "http://arbitrum.local"
relay_chain_id = 23
"#;

	fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
		let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	#[tokio::test]
	async fn test_load_toml() {
		let file = write_config(".toml", MINIMAL);
		let config = ConfigLoader::new()
			.with_env_prefix("STATUS_TEST_TOML_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();

		assert_eq!(config.server.port, 8088);
		assert_eq!(config.server.host, "0.0.0.0");
		assert_eq!(config.sodax.relayer_api_endpoint, "http://relay.local");
		assert_eq!(config.sodax.intent_execution_timeout_ms, 30_000);
		assert_eq!(config.chains.len(), 2);
		assert_eq!(
			config.chains[&SpokeChainId::from("0xa4b1.arbitrum")].relay_chain_id,
			23
		);
	}

	#[tokio::test]
	async fn test_load_json() {
		let json = r#"{
			"sodax": { "hub_chain": "sui" },
			"chains": { "sui": { "name": "Sui", "rpc_url": "http://sui.local", "relay_chain_id": 21 } }
		}"#;
		let file = write_config(".json", json);
		let config = ConfigLoader::new()
			.with_env_prefix("STATUS_TEST_JSON_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();

		assert_eq!(config.sodax.hub_chain.as_str(), "sui");
		assert_eq!(config.chains.len(), 1);
	}

	#[tokio::test]
	async fn test_defaults_without_file() {
		let config = ConfigLoader::new()
			.with_env_prefix("STATUS_TEST_DEFAULTS_")
			.load()
			.await
			.unwrap();
		assert_eq!(config.chains.len(), 11);
	}

	#[tokio::test]
	async fn test_missing_file() {
		let result = ConfigLoader::new()
			.with_file("/nonexistent/status.toml")
			.load()
			.await;
		assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
	}

	#[tokio::test]
	async fn test_env_substitution() {
		env::set_var("STATUS_TEST_SUBST_RELAY", "http://substituted.local");
		let content = MINIMAL.replace("http://relay.local", "${STATUS_TEST_SUBST_RELAY}");
		let file = write_config(".toml", &content);

		let config = ConfigLoader::new()
			.with_env_prefix("STATUS_TEST_SUBST_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();
		assert_eq!(config.sodax.relayer_api_endpoint, "http://substituted.local");
	}

	#[tokio::test]
	async fn test_missing_env_var() {
		let content = MINIMAL.replace("http://relay.local", "${STATUS_TEST_UNSET_VARIABLE}");
		let file = write_config(".toml", &content);

		let result = ConfigLoader::new().with_file(file.path()).load().await;
		assert!(
			matches!(result, Err(ConfigError::EnvVarNotFound(ref name)) if name == "STATUS_TEST_UNSET_VARIABLE")
		);
	}

	#[tokio::test]
	async fn test_env_overrides() {
		env::set_var("STATUS_TEST_OVR_PORT", "9191");
		env::set_var("STATUS_TEST_OVR_SOLVER_API_URL", "http://override.local");
		let file = write_config(".toml", MINIMAL);

		let config = ConfigLoader::new()
			.with_env_prefix("STATUS_TEST_OVR_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();
		assert_eq!(config.server.port, 9191);
		assert_eq!(config.sodax.solver_api_endpoint, "http://override.local");
	}

	#[tokio::test]
	async fn test_invalid_port_override() {
		env::set_var("STATUS_TEST_BADPORT_PORT", "not-a-port");
		let result = ConfigLoader::new()
			.with_env_prefix("STATUS_TEST_BADPORT_")
			.load()
			.await;
		assert!(matches!(result, Err(ConfigError::ValidationError(_))));
	}

	#[test]
	fn test_validate_unknown_hub() {
		let mut config = StatusConfig::default();
		config.sodax.hub_chain = SpokeChainId::from("tron");
		let err = validate_config(&config).unwrap_err();
		assert!(err.to_string().contains("Hub chain 'tron'"));
	}

	#[test]
	fn test_validate_zero_timeout() {
		let mut config = StatusConfig::default();
		config.sodax.intent_execution_timeout_ms = 0;
		assert!(validate_config(&config).is_err());
	}
}
