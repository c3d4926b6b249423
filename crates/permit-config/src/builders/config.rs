//! Configuration builder for tests and local development.

use crate::{AccountConfig, Config, DomainConfig, PermitConfig};
use permit_types::{Address, SecretString};

/// Hardhat's first default account key; only meant for local networks.
const DEV_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Builder for `Config` instances with local-network defaults.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
	name: String,
	version: String,
	chain_id: u64,
	verifying_contract: Address,
	private_key: String,
	deadline_seconds: u64,
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigBuilder {
	/// Defaults mirror a fresh Hardhat node: chain 1337 and the first
	/// deployment address of account #0.
	pub fn new() -> Self {
		Self {
			name: "Token".to_string(),
			version: "1".to_string(),
			chain_id: 1337,
			verifying_contract: Address::new([
				0x5f, 0xbd, 0xb2, 0x31, 0x56, 0x78, 0xaf, 0xec, 0xb3, 0x67, 0xf0, 0x32, 0xd9, 0x3f,
				0x64, 0x2f, 0x64, 0x18, 0x0a, 0xa3,
			]),
			private_key: DEV_PRIVATE_KEY.to_string(),
			deadline_seconds: 1000,
		}
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn version(mut self, version: impl Into<String>) -> Self {
		self.version = version.into();
		self
	}

	pub fn chain_id(mut self, chain_id: u64) -> Self {
		self.chain_id = chain_id;
		self
	}

	pub fn verifying_contract(mut self, address: Address) -> Self {
		self.verifying_contract = address;
		self
	}

	pub fn private_key(mut self, key: impl Into<String>) -> Self {
		self.private_key = key.into();
		self
	}

	pub fn deadline_seconds(mut self, seconds: u64) -> Self {
		self.deadline_seconds = seconds;
		self
	}

	/// Builds the configuration without running validation.
	pub fn build(self) -> Config {
		Config {
			domain: DomainConfig {
				name: self.name,
				version: self.version,
				chain_id: self.chain_id,
				verifying_contract: self.verifying_contract,
			},
			account: AccountConfig {
				private_key: SecretString::new(self.private_key),
			},
			permit: PermitConfig {
				deadline_seconds: self.deadline_seconds,
			},
		}
	}
}
