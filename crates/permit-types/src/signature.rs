//! Decomposed ECDSA signature as consumed by ERC-2612 `permit`.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// Length in bytes of a raw `r || s || v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Raw 65-byte signature as produced by a signer: `r (32) || s (32) || v (1)`.
pub type RawSignature = [u8; SIGNATURE_LENGTH];

/// The `(v, r, s)` triple a verifier expects.
///
/// `v` is the recovery byte in its Ethereum form (27 or 28).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
	pub r: B256,
	pub s: B256,
	pub v: u8,
}

impl Signature {
	pub fn new(r: B256, s: B256, v: u8) -> Self {
		Self { r, s, v }
	}
}
