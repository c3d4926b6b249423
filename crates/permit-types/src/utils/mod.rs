//! Utility functions for EIP-712 hashing and string formatting.

pub mod eip712;
pub mod formatting;
pub mod helpers;

pub use eip712::{
	compute_domain_hash, compute_final_digest, compute_permit_struct_hash, domain_type_hash,
	permit_type_hash, Eip712AbiEncoder, DOMAIN_TYPE, PERMIT_PRIMARY_TYPE, PERMIT_TYPE,
};
pub use formatting::{truncate_hex, without_0x_prefix};
pub use helpers::current_timestamp;
