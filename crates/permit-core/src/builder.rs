//! Client-side permit construction.
//!
//! [`PermitMessageBuilder`] binds a token's domain once and produces
//! [`TypedData`] payloads for it. [`PermitMessageBuilder::sign`] runs the full
//! owner-side flow: build, sign with an injected [`PermitSigner`], split.

use crate::codec;
use permit_account::{AccountError, PermitSigner};
use permit_types::{Address, DomainDescriptor, PermitMessage, SignedPermit, TypedData, U256};

/// Builds ERC-2612 typed-data payloads for one token domain.
///
/// Construction is pure and does no validation beyond type shape; range and
/// time checks happen at verification.
#[derive(Debug, Clone)]
pub struct PermitMessageBuilder {
	domain: DomainDescriptor,
}

impl PermitMessageBuilder {
	pub fn new(domain: DomainDescriptor) -> Self {
		Self { domain }
	}

	pub fn domain(&self) -> &DomainDescriptor {
		&self.domain
	}

	/// Assembles the `Permit` typed data for the given fields.
	pub fn build(
		&self,
		owner: Address,
		spender: Address,
		value: U256,
		nonce: U256,
		deadline: U256,
	) -> TypedData {
		TypedData::new(
			self.domain.clone(),
			PermitMessage {
				owner,
				spender,
				value,
				nonce,
				deadline,
			},
		)
	}

	/// Builds a permit owned by `signer`'s address, signs it and splits the
	/// signature into `(v, r, s)`.
	///
	/// `nonce` must be the owner's current nonce on the token; the builder
	/// does not look it up.
	pub async fn sign(
		&self,
		signer: &dyn PermitSigner,
		spender: Address,
		value: U256,
		nonce: U256,
		deadline: U256,
	) -> Result<SignedPermit, AccountError> {
		let typed_data = self.build(signer.address(), spender, value, nonce, deadline);
		let signature = codec::sign(signer, &typed_data).await?;

		tracing::debug!(
			owner = %typed_data.message.owner,
			spender = %spender,
			%value,
			%nonce,
			%deadline,
			v = signature.v,
			"Built signed permit"
		);

		Ok(SignedPermit {
			message: typed_data.message,
			signature,
		})
	}
}
