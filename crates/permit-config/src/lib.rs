//! Configuration module for the permit relay.
//!
//! Configuration is read from a TOML file. `${VAR}` and `${VAR:-default}`
//! placeholders are resolved from the environment before parsing, so signing
//! keys can be injected without being written to disk. Every loaded
//! configuration is validated before it is returned.

#[cfg(feature = "testing")]
pub mod builders {
	pub mod config;
}

use permit_types::{Address, DomainDescriptor, SecretString};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message only; the default rendering dumps the whole input.
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// EIP-712 domain of the token permits are signed for.
	pub domain: DomainConfig,
	/// Signing account of the token owner.
	pub account: AccountConfig,
	/// Defaults applied when building permits.
	#[serde(default)]
	pub permit: PermitConfig,
}

/// EIP-712 domain of the permit token.
///
/// Must match the token's own stored domain exactly, otherwise every
/// signature produced with it is rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DomainConfig {
	/// Token name as used in the domain separator.
	pub name: String,
	/// Domain version; ERC-2612 tokens conventionally use "1".
	#[serde(default = "default_domain_version")]
	pub version: String,
	/// Chain ID the token is deployed on.
	pub chain_id: u64,
	/// Token contract address.
	pub verifying_contract: Address,
}

impl DomainConfig {
	pub fn descriptor(&self) -> DomainDescriptor {
		DomainDescriptor::new(
			self.name.clone(),
			self.version.clone(),
			self.chain_id,
			self.verifying_contract,
		)
	}
}

fn default_domain_version() -> String {
	"1".to_string()
}

/// Configuration of the local signing account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
	/// Hex-encoded secp256k1 private key, with or without 0x prefix.
	pub private_key: SecretString,
}

/// Defaults for permit construction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PermitConfig {
	/// Validity window added to the current time when no explicit deadline is given.
	#[serde(default = "default_deadline_seconds")]
	pub deadline_seconds: u64,
}

impl Default for PermitConfig {
	fn default() -> Self {
		Self {
			deadline_seconds: default_deadline_seconds(),
		}
	}
}

/// Long enough to sign and relay by hand against a local node.
fn default_deadline_seconds() -> u64 {
	1000
}

/// Longest permit validity window accepted from configuration (30 days).
const MAX_DEADLINE_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut replacements = Vec::new();
	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match cap.get(2) {
				Some(default) => default.as_str().to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)))
				},
			},
		};
		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply in reverse so earlier offsets stay valid.
	let mut result = input.to_string();
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads, resolves and validates a configuration file.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("Cannot read {}: {}", path.display(), e),
			))
		})?;
		content.parse()
	}

	/// Validates the configuration:
	/// - domain name and version are non-empty
	/// - chain ID is non-zero
	/// - verifying contract is not the zero address
	/// - a private key is present
	/// - the default deadline window is within bounds
	fn validate(&self) -> Result<(), ConfigError> {
		if self.domain.name.is_empty() {
			return Err(ConfigError::Validation(
				"Domain name cannot be empty".into(),
			));
		}
		if self.domain.version.is_empty() {
			return Err(ConfigError::Validation(
				"Domain version cannot be empty".into(),
			));
		}
		if self.domain.chain_id == 0 {
			return Err(ConfigError::Validation(
				"Domain chain_id must be greater than 0".into(),
			));
		}
		if self.domain.verifying_contract.is_zero() {
			return Err(ConfigError::Validation(
				"Domain verifying_contract cannot be the zero address".into(),
			));
		}
		if self.account.private_key.is_empty() {
			return Err(ConfigError::Validation(
				"Account private_key cannot be empty".into(),
			));
		}
		if self.permit.deadline_seconds == 0 {
			return Err(ConfigError::Validation(
				"Permit deadline_seconds must be greater than 0".into(),
			));
		}
		if self.permit.deadline_seconds > MAX_DEADLINE_SECONDS {
			return Err(ConfigError::Validation(format!(
				"Permit deadline_seconds cannot exceed {} (30 days)",
				MAX_DEADLINE_SECONDS
			)));
		}
		Ok(())
	}
}

/// Parses a TOML string, resolving environment variables and validating the
/// result.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
