//! ERC-2612 permit message, domain and typed-data types.
//!
//! A [`TypedData`] value is the exact object that gets hashed and signed. Its
//! schema is fixed: reordering or renaming any field changes the digest and
//! breaks interoperability with every other verifier of the scheme.

use crate::utils::eip712::{
	compute_domain_hash, compute_final_digest, compute_permit_struct_hash, PERMIT_PRIMARY_TYPE,
};
use crate::Signature;
use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A single `(name, type)` entry of an EIP-712 struct schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypedDataField {
	pub name: &'static str,
	#[serde(rename = "type")]
	pub ty: &'static str,
}

impl TypedDataField {
	const fn new(name: &'static str, ty: &'static str) -> Self {
		Self { name, ty }
	}
}

/// Field list of the `EIP712Domain` struct.
pub const DOMAIN_FIELDS: [TypedDataField; 4] = [
	TypedDataField::new("name", "string"),
	TypedDataField::new("version", "string"),
	TypedDataField::new("chainId", "uint256"),
	TypedDataField::new("verifyingContract", "address"),
];

/// Field list of the `Permit` struct, in hashing order.
pub const PERMIT_FIELDS: [TypedDataField; 5] = [
	TypedDataField::new("owner", "address"),
	TypedDataField::new("spender", "address"),
	TypedDataField::new("value", "uint256"),
	TypedDataField::new("nonce", "uint256"),
	TypedDataField::new("deadline", "uint256"),
];

/// The ERC-2612 permit payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitMessage {
	pub owner: Address,
	pub spender: Address,
	/// Allowance granted to `spender`. Always hashed and serialized as `value`.
	pub value: U256,
	pub nonce: U256,
	/// Unix timestamp (seconds) after which the permit is no longer valid.
	pub deadline: U256,
}

impl PermitMessage {
	pub fn struct_hash(&self) -> B256 {
		compute_permit_struct_hash(
			&self.owner,
			&self.spender,
			self.value,
			self.nonce,
			self.deadline,
		)
	}
}

/// Identifies the protocol instance a permit signature is valid for.
///
/// Must match the verifying token's own stored domain exactly; a signature
/// produced for one deployment or chain never validates on another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDescriptor {
	pub name: String,
	pub version: String,
	pub chain_id: u64,
	pub verifying_contract: Address,
}

impl DomainDescriptor {
	pub fn new(
		name: impl Into<String>,
		version: impl Into<String>,
		chain_id: u64,
		verifying_contract: Address,
	) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
			chain_id,
			verifying_contract,
		}
	}

	/// The EIP-712 domain separator of this domain.
	pub fn separator(&self) -> B256 {
		compute_domain_hash(
			&self.name,
			&self.version,
			self.chain_id,
			&self.verifying_contract,
		)
	}
}

/// Fully assembled EIP-712 payload for a permit: schema, primary type,
/// domain and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedData {
	pub domain: DomainDescriptor,
	pub message: PermitMessage,
}

impl TypedData {
	pub fn new(domain: DomainDescriptor, message: PermitMessage) -> Self {
		Self { domain, message }
	}

	pub fn primary_type(&self) -> &'static str {
		PERMIT_PRIMARY_TYPE
	}

	pub fn fields(&self) -> &'static [TypedDataField] {
		&PERMIT_FIELDS
	}

	pub fn domain_separator(&self) -> B256 {
		self.domain.separator()
	}

	pub fn struct_hash(&self) -> B256 {
		self.message.struct_hash()
	}

	/// The digest a signer signs: keccak256(0x1901 || domainSeparator || structHash).
	pub fn signing_hash(&self) -> B256 {
		compute_final_digest(&self.domain_separator(), &self.struct_hash())
	}

	/// Renders the payload in the JSON shape accepted by `eth_signTypedData_v4`.
	///
	/// Integers are emitted as decimal strings so that 256-bit values survive
	/// JSON consumers that parse numbers as doubles.
	pub fn to_json(&self) -> serde_json::Value {
		json!({
			"types": {
				"EIP712Domain": DOMAIN_FIELDS,
				"Permit": PERMIT_FIELDS,
			},
			"primaryType": self.primary_type(),
			"domain": {
				"name": self.domain.name,
				"version": self.domain.version,
				"chainId": self.domain.chain_id,
				"verifyingContract": self.domain.verifying_contract.to_checksum(None),
			},
			"message": {
				"owner": self.message.owner.to_checksum(None),
				"spender": self.message.spender.to_checksum(None),
				"value": self.message.value.to_string(),
				"nonce": self.message.nonce.to_string(),
				"deadline": self.message.deadline.to_string(),
			},
		})
	}
}

/// A permit message together with the owner's decomposed signature over it.
///
/// This is what a client hands to a relayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPermit {
	#[serde(flatten)]
	pub message: PermitMessage,
	#[serde(flatten)]
	pub signature: Signature,
}
