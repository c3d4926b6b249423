//! Token interface consumed by relayers.
//!
//! A [`PermitToken`] is the verifying side of the protocol: it owns the nonce
//! counters and allowances, and is the only place they are mutated. Every
//! method is an atomic call; a rejected call leaves the token unchanged.

use crate::PermitError;
use async_trait::async_trait;
use permit_types::{Address, DomainDescriptor, SignedPermit, B256, U256};

pub mod memory;

/// ERC-20 surface plus the ERC-2612 `permit` entry point.
#[async_trait]
pub trait PermitToken: Send + Sync {
	/// The token's own EIP-712 domain. Permits are always verified against it.
	fn domain(&self) -> &DomainDescriptor;

	/// Separator of [`PermitToken::domain`].
	fn domain_separator(&self) -> B256;

	/// Verifies a signed permit and, on success, consumes the owner's nonce
	/// and sets `allowance(owner, spender) = value`.
	async fn permit(&self, permit: &SignedPermit) -> Result<(), PermitError>;

	/// Next nonce `owner` must sign with.
	async fn nonces(&self, owner: Address) -> U256;

	async fn allowance(&self, owner: Address, spender: Address) -> U256;

	async fn balance_of(&self, owner: Address) -> U256;

	/// Direct approval path, called by `owner` itself.
	async fn approve(&self, owner: Address, spender: Address, value: U256)
		-> Result<(), PermitError>;

	/// Moves `amount` from `from` to `to`, spending `spender`'s allowance.
	async fn transfer_from(
		&self,
		spender: Address,
		from: Address,
		to: Address,
		amount: U256,
	) -> Result<(), PermitError>;
}
