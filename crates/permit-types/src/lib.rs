//! Common types for the permit relay workspace.
//!
//! This crate defines the ERC-2612 permit payload, its EIP-712 domain and
//! typed-data wrapper, the decomposed signature triple, ledger events and the
//! hashing utilities every other crate relies on to agree byte-for-byte.

/// Ledger event types for inter-service communication.
pub mod events;
/// Permit message, domain and typed-data types.
pub mod permit;
/// Secret string type for signing keys.
pub mod secret_string;
/// The `(v, r, s)` signature triple.
pub mod signature;
/// EIP-712 hashing and formatting helpers.
pub mod utils;

// Re-export all types for convenient access
pub use alloy_primitives::{Address, B256, U256};
pub use events::*;
pub use permit::{
	DomainDescriptor, PermitMessage, SignedPermit, TypedData, TypedDataField, DOMAIN_FIELDS,
	PERMIT_FIELDS,
};
pub use secret_string::SecretString;
pub use signature::{RawSignature, Signature, SIGNATURE_LENGTH};
pub use utils::{current_timestamp, truncate_hex, without_0x_prefix};
