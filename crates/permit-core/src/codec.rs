//! Signature codec: splits a raw 65-byte signature into the `(v, r, s)` triple
//! a permit verifier expects, and joins it back.
//!
//! Layout: bytes `[0, 32)` are `r`, `[32, 64)` are `s`, byte 64 is `v`.
//! No other length is accepted.

use permit_account::{AccountError, PermitSigner};
use permit_types::{without_0x_prefix, RawSignature, Signature, TypedData, B256, SIGNATURE_LENGTH};
use thiserror::Error;

/// Errors that can occur while decoding raw signatures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
	/// Input is not exactly 65 bytes long.
	#[error("Invalid signature length: expected 65 bytes, got {actual}")]
	InvalidSignatureLength { actual: usize },
	/// Input is not valid hex.
	#[error("Invalid signature hex: {0}")]
	InvalidHex(String),
}

/// Has `signer` sign `typed_data` and splits the result.
pub async fn sign(
	signer: &dyn PermitSigner,
	typed_data: &TypedData,
) -> Result<Signature, AccountError> {
	let raw = signer.sign_typed_data(typed_data).await?;
	Ok(split_raw(&raw))
}

/// Splits a raw signature into `r`, `s` and `v`.
pub fn split(raw: &[u8]) -> Result<Signature, CodecError> {
	let raw: &RawSignature = raw
		.try_into()
		.map_err(|_| CodecError::InvalidSignatureLength { actual: raw.len() })?;
	Ok(split_raw(raw))
}

/// Infallible [`split`] for input already known to be 65 bytes.
pub fn split_raw(raw: &RawSignature) -> Signature {
	Signature {
		r: B256::from_slice(&raw[..32]),
		s: B256::from_slice(&raw[32..64]),
		v: raw[64],
	}
}

/// Splits a hex-encoded signature, with or without 0x prefix.
pub fn split_hex(hex_str: &str) -> Result<Signature, CodecError> {
	let bytes =
		hex::decode(without_0x_prefix(hex_str)).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
	split(&bytes)
}

/// Joins `r`, `s` and `v` back into the raw layout. Exact inverse of [`split`].
pub fn combine(signature: &Signature) -> RawSignature {
	let mut raw = [0u8; SIGNATURE_LENGTH];
	raw[..32].copy_from_slice(signature.r.as_slice());
	raw[32..64].copy_from_slice(signature.s.as_slice());
	raw[64] = signature.v;
	raw
}

/// Hex encoding of [`combine`], 0x-prefixed.
pub fn to_hex(signature: &Signature) -> String {
	format!("0x{}", hex::encode(combine(signature)))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_raw() -> RawSignature {
		let mut raw = [0u8; SIGNATURE_LENGTH];
		for (i, b) in raw.iter_mut().enumerate() {
			*b = i as u8;
		}
		raw[64] = 28;
		raw
	}

	#[test]
	fn test_split_layout() {
		let raw = sample_raw();
		let sig = split(&raw).unwrap();
		assert_eq!(sig.r.as_slice(), &raw[..32]);
		assert_eq!(sig.s.as_slice(), &raw[32..64]);
		assert_eq!(sig.v, 28);
	}

	#[test]
	fn test_combine_inverts_split() {
		let patterns: [fn(usize) -> u8; 4] = [
			|_| 0x00,
			|_| 0xff,
			|i| i as u8,
			|i| (i as u8).wrapping_mul(37) ^ 0xa5,
		];
		for pattern in patterns {
			for v in 0..=u8::MAX {
				let mut raw = [0u8; SIGNATURE_LENGTH];
				for (i, b) in raw.iter_mut().enumerate() {
					*b = pattern(i);
				}
				raw[64] = v;

				let sig = split(&raw).unwrap();
				assert_eq!(sig.v, v);
				assert_eq!(combine(&sig), raw);
			}
		}
	}

	#[test]
	fn test_wrong_lengths_rejected() {
		for len in [0usize, 1, 32, 64, 66, 130] {
			let bytes = vec![1u8; len];
			assert_eq!(
				split(&bytes),
				Err(CodecError::InvalidSignatureLength { actual: len })
			);
		}
	}

	#[test]
	fn test_hex_round_trip() {
		let raw = sample_raw();
		let encoded = format!("0x{}", hex::encode(raw));
		let sig = split_hex(&encoded).unwrap();
		assert_eq!(to_hex(&sig), encoded);
		assert_eq!(split_hex(&encoded[2..]).unwrap(), sig);
	}

	#[tokio::test]
	async fn test_sign_splits_signer_output() {
		use alloy_primitives::address;
		use permit_account::implementations::local::LocalSigner;
		use permit_types::{DomainDescriptor, PermitMessage, U256};

		let signer = LocalSigner::random();
		let typed = TypedData::new(
			DomainDescriptor::new("Token", "1", 1337, address!("5FbDB2315678afecb367f032d93F642f64180aa3")),
			PermitMessage {
				owner: signer.address(),
				spender: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
				value: U256::from(1u64),
				nonce: U256::ZERO,
				deadline: U256::MAX,
			},
		);

		let raw = signer.sign_typed_data(&typed).await.unwrap();
		let sig = sign(&signer, &typed).await.unwrap();
		assert_eq!(combine(&sig), raw);
		assert!(sig.v == 27 || sig.v == 28);
	}

	#[test]
	fn test_hex_errors() {
		assert!(matches!(split_hex("0xzz"), Err(CodecError::InvalidHex(_))));
		assert_eq!(
			split_hex("0xabcd"),
			Err(CodecError::InvalidSignatureLength { actual: 2 })
		);
	}
}
