//! Event types published by permit tokens.
//!
//! Events flow through an event bus so that relayers and monitors can react to
//! approvals and transfers without polling token state.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Events emitted by a token, scoped by the token's verifying-contract address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
	/// An allowance was set, either by an accepted permit or a direct approval.
	Approval {
		token: Address,
		owner: Address,
		spender: Address,
		value: U256,
	},
	/// Tokens moved between accounts. Mints use `Address::ZERO` as `from`.
	Transfer {
		token: Address,
		from: Address,
		to: Address,
		value: U256,
	},
	/// A permit was accepted and consumed `nonce`.
	PermitAccepted {
		token: Address,
		owner: Address,
		spender: Address,
		nonce: U256,
	},
	/// A permit was rejected; token state is unchanged.
	PermitRejected {
		token: Address,
		owner: Address,
		reason: String,
	},
}
