//! Local private-key signer.
//!
//! Holds a secp256k1 key in process memory. Suitable for development,
//! relayer-side testing and CLI usage.

use crate::{AccountError, PermitSigner};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use permit_types::{without_0x_prefix, Address, RawSignature, SecretString, TypedData};

/// Signs permits with an in-memory private key.
#[derive(Debug, Clone)]
pub struct LocalSigner {
	signer: PrivateKeySigner,
}

impl LocalSigner {
	/// Creates a signer from a hex-encoded key, with or without 0x prefix.
	pub fn from_private_key(private_key: &SecretString) -> Result<Self, AccountError> {
		let signer = private_key
			.with_exposed(|key| without_0x_prefix(key).parse::<PrivateKeySigner>())
			.map_err(|e| AccountError::InvalidKey(format!("Failed to parse private key: {}", e)))?;
		Ok(Self { signer })
	}

	/// Creates a signer with a freshly generated key.
	pub fn random() -> Self {
		Self {
			signer: PrivateKeySigner::random(),
		}
	}
}

#[async_trait]
impl PermitSigner for LocalSigner {
	fn address(&self) -> Address {
		self.signer.address()
	}

	async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<RawSignature, AccountError> {
		let hash = typed_data.signing_hash();
		let signature = self
			.signer
			.sign_hash(&hash)
			.await
			.map_err(|e| AccountError::SigningFailed(e.to_string()))?;

		tracing::debug!(
			signer = %self.signer.address(),
			digest = %hash,
			"Signed permit typed data"
		);
		Ok(signature.as_bytes())
	}
}

/// Factory for a boxed local signer.
pub fn create_signer(private_key: &SecretString) -> Result<Box<dyn PermitSigner>, AccountError> {
	Ok(Box::new(LocalSigner::from_private_key(private_key)?))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, Signature as AlloySignature, U256};
	use permit_types::{DomainDescriptor, PermitMessage};

	const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

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
				value: U256::from(10u64),
				nonce: U256::ZERO,
				deadline: U256::from(2_000_000_000u64),
			},
		)
	}

	#[test]
	fn test_known_key_address() {
		let signer = LocalSigner::from_private_key(&SecretString::from(HARDHAT_KEY)).unwrap();
		assert_eq!(
			signer.address(),
			address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
		);

		let unprefixed = SecretString::from(without_0x_prefix(HARDHAT_KEY));
		let signer = LocalSigner::from_private_key(&unprefixed).unwrap();
		assert_eq!(
			signer.address(),
			address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
		);
	}

	#[test]
	fn test_invalid_key_rejected() {
		let result = LocalSigner::from_private_key(&SecretString::from("0xnothex"));
		assert!(matches!(result, Err(AccountError::InvalidKey(_))));
	}

	#[tokio::test]
	async fn test_signature_recovers_to_signer() {
		let signer = LocalSigner::random();
		let typed = typed_data(signer.address());

		let raw = signer.sign_typed_data(&typed).await.unwrap();
		assert!(raw[64] == 27 || raw[64] == 28);

		let parsed = AlloySignature::from_raw(&raw).unwrap();
		let recovered = parsed
			.recover_address_from_prehash(&typed.signing_hash())
			.unwrap();
		assert_eq!(recovered, signer.address());
	}

	#[tokio::test]
	async fn test_signing_is_deterministic() {
		let signer = create_signer(&SecretString::from(HARDHAT_KEY)).unwrap();
		let typed = typed_data(signer.address());

		let first = signer.sign_typed_data(&typed).await.unwrap();
		let second = signer.sign_typed_data(&typed).await.unwrap();
		assert_eq!(first, second);
	}
}
