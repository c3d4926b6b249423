//! Verifier-side hashing and signer recovery.
//!
//! The verifier recomputes the digest from public data only (its own stored
//! domain plus the presented message) and recovers the signing address with
//! standard secp256k1 public-key recovery.

use crate::PermitError;
use alloy_primitives::{uint, Signature as EcdsaSignature};
use permit_types::{
	utils::compute_final_digest, Address, DomainDescriptor, PermitMessage, Signature, B256, U256,
};

/// Upper bound for the `s` value of a non-malleable signature (secp256k1n / 2).
pub const SIGNATURE_S_UPPER_BOUND: U256 =
	uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// EIP-712 digest of `message` under `domain`.
pub fn permit_digest(domain: &DomainDescriptor, message: &PermitMessage) -> B256 {
	compute_final_digest(&domain.separator(), &message.struct_hash())
}

/// Recovers the address that signed `digest`.
///
/// Rejects malleable signatures: `s` must be in the lower half order and `v`
/// must be 27 or 28.
pub fn recover_signer(digest: &B256, signature: &Signature) -> Result<Address, PermitError> {
	let s = U256::from_be_bytes(signature.s.0);
	if s > SIGNATURE_S_UPPER_BOUND {
		return Err(PermitError::InvalidSignature(format!(
			"s value {} is in the upper half order",
			signature.s
		)));
	}

	let y_parity = match signature.v {
		27 => false,
		28 => true,
		v => {
			return Err(PermitError::InvalidSignature(format!(
				"v value {} is not 27 or 28",
				v
			)))
		},
	};

	let r = U256::from_be_bytes(signature.r.0);
	EcdsaSignature::new(r, s, y_parity)
		.recover_address_from_prehash(digest)
		.map_err(|e| PermitError::InvalidSignature(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec;
	use alloy_primitives::address;
	use permit_account::{implementations::local::LocalSigner, PermitSigner};
	use permit_types::TypedData;

	fn typed_data(owner: Address) -> TypedData {
		TypedData::new(
			DomainDescriptor::new(
				"Token",
				"1",
				1337,
				address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
			),
			PermitMessage {
				owner,
				spender: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
				value: U256::from(100u64),
				nonce: U256::ZERO,
				deadline: U256::from(2_000_000_000u64),
			},
		)
	}

	async fn signed(signer: &LocalSigner) -> (TypedData, Signature) {
		let typed = typed_data(signer.address());
		let raw = signer.sign_typed_data(&typed).await.unwrap();
		(typed, codec::split_raw(&raw))
	}

	#[tokio::test]
	async fn test_recovers_owner() {
		let signer = LocalSigner::random();
		let (typed, sig) = signed(&signer).await;

		let digest = permit_digest(&typed.domain, &typed.message);
		assert_eq!(digest, typed.signing_hash());
		assert_eq!(recover_signer(&digest, &sig).unwrap(), signer.address());
	}

	#[tokio::test]
	async fn test_rejects_bad_v() {
		let signer = LocalSigner::random();
		let (typed, mut sig) = signed(&signer).await;
		sig.v -= 27;

		let result = recover_signer(&typed.signing_hash(), &sig);
		assert!(matches!(result, Err(PermitError::InvalidSignature(_))));
	}

	#[tokio::test]
	async fn test_rejects_high_s() {
		let signer = LocalSigner::random();
		let (typed, mut sig) = signed(&signer).await;

		// Flip to the malleable twin (n - s, opposite parity).
		let n = uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);
		let s = U256::from_be_bytes(sig.s.0);
		sig.s = B256::from((n - s).to_be_bytes::<32>());
		sig.v = if sig.v == 27 { 28 } else { 27 };

		let result = recover_signer(&typed.signing_hash(), &sig);
		assert!(matches!(result, Err(PermitError::InvalidSignature(_))));
	}

	#[tokio::test]
	async fn test_other_digest_recovers_other_address() {
		let signer = LocalSigner::random();
		let (typed, sig) = signed(&signer).await;

		let mut tampered = typed.message;
		tampered.value = U256::from(101u64);
		let digest = permit_digest(&typed.domain, &tampered);

		// Recovery succeeds for almost every digest but yields an unrelated key.
		if let Ok(recovered) = recover_signer(&digest, &sig) {
			assert_ne!(recovered, signer.address());
		}
	}
}
