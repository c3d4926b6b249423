//! Subcommand implementations.

use permit_account::AccountError;
use permit_core::{PermitError, RelayError};
use permit_types::{Address, U256};
use thiserror::Error;

pub mod demo;
pub mod sign;

/// Errors surfaced by subcommands.
#[derive(Debug, Error)]
pub enum CommandError {
	#[error("Account error: {0}")]
	Account(#[from] AccountError),
	#[error("Relay error: {0}")]
	Relay(#[from] RelayError),
	#[error("Token error: {0}")]
	Token(#[from] PermitError),
	/// The demo flow observed a ledger state other than the expected one.
	#[error("Unexpected state: {0}")]
	Unexpected(String),
}

pub(crate) fn parse_address(s: &str) -> Result<Address, String> {
	s.parse::<Address>().map_err(|e| format!("invalid address '{s}': {e}"))
}

pub(crate) fn parse_u256(s: &str) -> Result<U256, String> {
	s.parse::<U256>().map_err(|e| format!("invalid uint256 '{s}': {e}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_u256() {
		assert_eq!(parse_u256("1000").unwrap(), U256::from(1000u64));
		assert_eq!(parse_u256("0x10").unwrap(), U256::from(16u64));
		assert!(parse_u256("ten").is_err());
	}

	#[test]
	fn test_parse_address() {
		assert!(parse_address("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").is_ok());
		assert!(parse_address("70997970").is_err());
	}
}
