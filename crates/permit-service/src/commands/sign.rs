//! `permit sign`: build and sign a permit for the configured owner.

use super::{parse_address, parse_u256, CommandError};
use clap::Args;
use permit_account::implementations::local::create_signer;
use permit_config::Config;
use permit_core::{codec, PermitMessageBuilder};
use permit_types::{current_timestamp, Address, TypedData, U256};
use serde_json::json;

#[derive(Args, Debug, Clone)]
pub struct SignArgs {
	/// Address allowed to spend the owner's tokens
	#[arg(long, value_parser = parse_address)]
	pub spender: Address,

	/// Allowance granted to the spender
	#[arg(long, value_parser = parse_u256)]
	pub value: U256,

	/// Owner's current nonce on the token
	#[arg(long, value_parser = parse_u256, default_value = "0")]
	pub nonce: U256,

	/// Absolute unix deadline; defaults to now plus the configured window
	#[arg(long, value_parser = parse_u256)]
	pub deadline: Option<U256>,
}

pub async fn run(config: &Config, args: &SignArgs) -> Result<serde_json::Value, CommandError> {
	let signer = create_signer(&config.account.private_key)?;
	let builder = PermitMessageBuilder::new(config.domain.descriptor());
	let deadline = args
		.deadline
		.unwrap_or_else(|| U256::from(current_timestamp() + config.permit.deadline_seconds));

	let permit = builder
		.sign(signer.as_ref(), args.spender, args.value, args.nonce, deadline)
		.await?;
	let typed_data = TypedData::new(builder.domain().clone(), permit.message);

	tracing::info!(
		owner = %permit.message.owner,
		spender = %args.spender,
		%deadline,
		"Signed permit"
	);

	Ok(json!({
		"typedData": typed_data.to_json(),
		"digest": typed_data.signing_hash(),
		"signature": codec::to_hex(&permit.signature),
		"permit": permit,
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;
	use permit_config::builders::config::ConfigBuilder;
	use permit_core::verify;
	use permit_types::SignedPermit;

	fn args(deadline: Option<U256>) -> SignArgs {
		SignArgs {
			spender: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
			value: U256::from(100u64),
			nonce: U256::ZERO,
			deadline,
		}
	}

	#[tokio::test]
	async fn test_sign_output_recovers_owner() {
		let config = ConfigBuilder::new().build();
		let output = run(&config, &args(Some(U256::from(2_000_000_000u64))))
			.await
			.unwrap();

		assert_eq!(output["typedData"]["primaryType"], "Permit");
		assert_eq!(output["typedData"]["message"]["deadline"], "2000000000");

		let permit: SignedPermit = serde_json::from_value(output["permit"].clone()).unwrap();
		let digest = verify::permit_digest(&config.domain.descriptor(), &permit.message);
		assert_eq!(
			verify::recover_signer(&digest, &permit.signature).unwrap(),
			address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
		);

		let split = codec::split_hex(output["signature"].as_str().unwrap()).unwrap();
		assert_eq!(split, permit.signature);
	}

	#[tokio::test]
	async fn test_default_deadline_uses_configured_window() {
		let config = ConfigBuilder::new().deadline_seconds(600).build();
		let before = current_timestamp();
		let output = run(&config, &args(None)).await.unwrap();

		let permit: SignedPermit = serde_json::from_value(output["permit"].clone()).unwrap();
		let deadline = permit.message.deadline.to::<u64>();
		assert!(deadline >= before + 600);
		assert!(deadline <= current_timestamp() + 600);
	}

	#[tokio::test]
	async fn test_invalid_key_rejected() {
		let config = ConfigBuilder::new().private_key("0xnothex").build();
		let err = run(&config, &args(None)).await.unwrap_err();
		assert!(matches!(err, CommandError::Account(_)));
	}
}
