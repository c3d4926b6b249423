//! EIP-712 utilities for ERC-2612 permits.
//!
//! These helpers provide:
//! - Domain separator computation over the full `EIP712Domain` (name, version, chainId, verifyingContract)
//! - `Permit` struct hash computation
//! - Final digest computation (0x1901 || domainSeparator || structHash)
//! - A minimal ABI encoder for the static field types the permit schema uses

use alloy_primitives::{keccak256, Address, B256, U256};

/// EIP-712 domain type string used by ERC-2612 tokens.
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
/// EIP-712 type string of the ERC-2612 `Permit` struct.
pub const PERMIT_TYPE: &str =
	"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";
/// Primary type name of a permit typed-data payload.
pub const PERMIT_PRIMARY_TYPE: &str = "Permit";

/// keccak256 of [`DOMAIN_TYPE`].
pub fn domain_type_hash() -> B256 {
	keccak256(DOMAIN_TYPE.as_bytes())
}

/// keccak256 of [`PERMIT_TYPE`].
pub fn permit_type_hash() -> B256 {
	keccak256(PERMIT_TYPE.as_bytes())
}

/// Compute the EIP-712 domain separator:
/// keccak256(abi.encode(typeHash, keccak256(name), keccak256(version), chainId, verifyingContract)).
pub fn compute_domain_hash(
	name: &str,
	version: &str,
	chain_id: u64,
	verifying_contract: &Address,
) -> B256 {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&domain_type_hash());
	enc.push_b256(&keccak256(name.as_bytes()));
	enc.push_b256(&keccak256(version.as_bytes()));
	enc.push_u256(U256::from(chain_id));
	enc.push_address(verifying_contract);
	keccak256(enc.finish())
}

/// Compute the `Permit` struct hash:
/// keccak256(abi.encode(PERMIT_TYPEHASH, owner, spender, value, nonce, deadline)).
pub fn compute_permit_struct_hash(
	owner: &Address,
	spender: &Address,
	value: U256,
	nonce: U256,
	deadline: U256,
) -> B256 {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&permit_type_hash());
	enc.push_address(owner);
	enc.push_address(spender);
	enc.push_u256(value);
	enc.push_u256(nonce);
	enc.push_u256(deadline);
	keccak256(enc.finish())
}

/// Compute the final EIP-712 digest: keccak256(0x1901 || domainHash || structHash).
pub fn compute_final_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Minimal ABI encoder for the static types used in permit hashing.
///
/// Every value occupies one 32-byte word; addresses are left-padded.
#[derive(Debug, Default)]
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Eip712AbiEncoder {
	pub fn new() -> Self {
		Self {
			buf: Vec::with_capacity(6 * 32),
		}
	}

	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	pub fn push_address(&mut self, addr: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}
