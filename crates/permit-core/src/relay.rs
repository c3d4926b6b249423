//! Relay forwarding signed permits to tokens.
//!
//! The relay is the third party that submits an owner's permit on their
//! behalf; it never needs the owner's key. Tokens are looked up by their
//! verifying-contract address.

use crate::token::PermitToken;
use crate::PermitError;
use permit_types::{truncate_hex, Address, SignedPermit, U256};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur while relaying a permit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
	/// No token is registered under the given address.
	#[error("Unknown token: {0}")]
	UnknownToken(Address),
	/// The token rejected the call.
	#[error(transparent)]
	Permit(#[from] PermitError),
}

/// Registry of tokens a relayer submits permits to.
#[derive(Default, Clone)]
pub struct PermitRelay {
	tokens: HashMap<Address, Arc<dyn PermitToken>>,
}

impl PermitRelay {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `token` under its verifying-contract address, replacing any
	/// previous registration for that address.
	pub fn register(&mut self, token: Arc<dyn PermitToken>) {
		let address = token.domain().verifying_contract;
		tracing::debug!(token = %address, name = %token.domain().name, "Registered token");
		self.tokens.insert(address, token);
	}

	pub fn token(&self, address: &Address) -> Result<&Arc<dyn PermitToken>, RelayError> {
		self.tokens
			.get(address)
			.ok_or(RelayError::UnknownToken(*address))
	}

	/// Submits `permit` to `token`. The result is the token's result,
	/// unmodified.
	#[instrument(skip_all, fields(token = %token, owner = %permit.message.owner))]
	pub async fn send(&self, token: Address, permit: &SignedPermit) -> Result<(), RelayError> {
		let target = self.token(&token)?;
		tracing::info!(
			signature = %truncate_hex(&crate::codec::to_hex(&permit.signature)),
			"Relaying permit"
		);
		target.permit(permit).await?;
		Ok(())
	}

	/// Submits `permit` and then pulls `amount` from the owner to `to` as the
	/// permit's spender.
	///
	/// The two calls are not atomic: if the transfer fails the allowance set
	/// by the permit remains in place.
	#[instrument(skip_all, fields(token = %token, owner = %permit.message.owner, to = %to, amount = %amount))]
	pub async fn send_and_transfer(
		&self,
		token: Address,
		permit: &SignedPermit,
		to: Address,
		amount: U256,
	) -> Result<(), RelayError> {
		let target = self.token(&token)?;
		target.permit(permit).await?;
		target
			.transfer_from(permit.message.spender, permit.message.owner, to, amount)
			.await?;
		Ok(())
	}
}
