//! Signing capability for permit owners.
//!
//! The permit flow never sees a private key directly: it asks a
//! [`PermitSigner`] to sign a [`TypedData`] payload and gets back a raw
//! 65-byte signature. Any key-management backend (local key, hardware module,
//! remote signer service) can implement the trait.

use async_trait::async_trait;
use permit_types::{Address, RawSignature, TypedData};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Capability to sign EIP-712 permit payloads on behalf of one owner.
///
/// Signing is a local computation: implementations must not touch verifier
/// state and the trait carries no timeout or cancellation semantics.
#[async_trait]
pub trait PermitSigner: Send + Sync {
	/// Address of the key this signer signs with.
	fn address(&self) -> Address;

	/// Signs the EIP-712 signing hash of `typed_data`.
	///
	/// Returns `r || s || v` with `v` in its Ethereum form (27 or 28).
	async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<RawSignature, AccountError>;
}
