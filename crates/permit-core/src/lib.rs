//! Core of the gasless-approval flow.
//!
//! The owner side builds and signs ERC-2612 permits ([`builder`]), the
//! signature codec moves between raw 65-byte signatures and `(v, r, s)`
//! ([`codec`]), tokens verify and apply permits ([`token`], [`verify`]) and a
//! relay submits them on the owner's behalf ([`relay`]). Ledger changes are
//! published on an [`event_bus::EventBus`].

use alloy_primitives::{Address, U256};
use thiserror::Error;

pub mod builder;
pub mod clock;
pub mod codec;
pub mod event_bus;
pub mod relay;
pub mod token;
pub mod verify;

pub use builder::PermitMessageBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::CodecError;
pub use event_bus::EventBus;
pub use relay::{PermitRelay, RelayError};
pub use token::{memory::MemoryToken, PermitToken};

/// Errors returned by permit tokens.
///
/// Every variant describes a rejected call that left the token unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermitError {
	/// The signature could not be recovered, or is malleable.
	#[error("Invalid signature: {0}")]
	InvalidSignature(String),
	/// The signature is valid but was not produced by the permit's owner.
	#[error("Invalid signer {signer}, expected owner {owner}")]
	InvalidSigner { signer: Address, owner: Address },
	/// The permit's deadline lies in the past.
	#[error("Permit expired: deadline {deadline}, now {now}")]
	Expired { deadline: U256, now: u64 },
	/// The permit was signed for a nonce other than the owner's current one.
	#[error("Nonce mismatch for {owner}: expected {expected}, got {actual}")]
	NonceMismatch {
		owner: Address,
		expected: U256,
		actual: U256,
	},
	#[error("Insufficient allowance for {spender}: {allowance} < {needed}")]
	InsufficientAllowance {
		spender: Address,
		allowance: U256,
		needed: U256,
	},
	#[error("Insufficient balance for {sender}: {balance} < {needed}")]
	InsufficientBalance {
		sender: Address,
		balance: U256,
		needed: U256,
	},
	#[error("Invalid spender: {0}")]
	InvalidSpender(Address),
	#[error("Invalid sender: {0}")]
	InvalidSender(Address),
	#[error("Invalid receiver: {0}")]
	InvalidReceiver(Address),
	#[error("Invalid approver: {0}")]
	InvalidApprover(Address),
	/// Crediting the account would overflow its balance.
	#[error("Balance overflow for {0}")]
	BalanceOverflow(Address),
}

impl PermitError {
	/// Whether the owner has to sign a fresh permit to recover.
	///
	/// Signature, signer, deadline and nonce failures cannot succeed on retry
	/// with the same permit; balance and allowance failures may once state
	/// changes.
	pub fn requires_new_permit(&self) -> bool {
		matches!(
			self,
			PermitError::InvalidSignature(_)
				| PermitError::InvalidSigner { .. }
				| PermitError::Expired { .. }
				| PermitError::NonceMismatch { .. }
				| PermitError::InvalidSpender(_)
		)
	}
}
