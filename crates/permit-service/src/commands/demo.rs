//! `permit demo`: end-to-end run of the gasless approval flow.
//!
//! The configured account acts as owner and signs a permit for a freshly
//! generated spender. The permit is relayed to an in-memory token bound to the
//! configured domain, the spender pulls the full allowance, and the same
//! permit is replayed to show it is rejected.

use super::{parse_u256, CommandError};
use clap::Args;
use permit_account::{implementations::local::LocalSigner, PermitSigner};
use permit_config::Config;
use permit_core::{
	codec, MemoryToken, PermitError, PermitMessageBuilder, PermitRelay, PermitToken, RelayError,
};
use permit_types::{current_timestamp, LedgerEvent, U256};
use serde_json::json;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
	/// Allowance granted by the permit and then transferred
	#[arg(long, value_parser = parse_u256, default_value = "100")]
	pub value: U256,

	/// Balance minted to the owner before the permit is signed
	#[arg(long, value_parser = parse_u256, default_value = "1000")]
	pub mint: U256,
}

fn expect_eq(what: &str, actual: U256, expected: U256) -> Result<(), CommandError> {
	if actual != expected {
		return Err(CommandError::Unexpected(format!(
			"{what} is {actual}, expected {expected}"
		)));
	}
	Ok(())
}

pub async fn run(config: &Config, args: &DemoArgs) -> Result<serde_json::Value, CommandError> {
	let domain = config.domain.descriptor();
	let token_address = domain.verifying_contract;
	let token = Arc::new(MemoryToken::with_system_clock(domain.clone()));
	let mut events = token.event_bus().subscribe();

	let mut relay = PermitRelay::new();
	relay.register(token.clone());

	let owner = LocalSigner::from_private_key(&config.account.private_key)?;
	let spender = LocalSigner::random().address();
	token.mint(owner.address(), args.mint).await?;

	let nonce = token.nonces(owner.address()).await;
	let deadline = U256::from(current_timestamp() + config.permit.deadline_seconds);
	let permit = PermitMessageBuilder::new(domain)
		.sign(&owner, spender, args.value, nonce, deadline)
		.await?;

	relay.send(token_address, &permit).await?;
	let allowance = token.allowance(owner.address(), spender).await;
	let next_nonce = token.nonces(owner.address()).await;
	expect_eq("allowance after permit", allowance, args.value)?;
	expect_eq("nonce after permit", next_nonce, nonce + U256::from(1))?;

	token
		.transfer_from(spender, owner.address(), spender, args.value)
		.await?;
	let remaining = token.allowance(owner.address(), spender).await;
	let spender_balance = token.balance_of(spender).await;
	expect_eq("allowance after transfer", remaining, U256::ZERO)?;

	let replay = match relay.send(token_address, &permit).await {
		Err(RelayError::Permit(e @ PermitError::NonceMismatch { .. })) => e.to_string(),
		Err(e) => return Err(e.into()),
		Ok(()) => {
			return Err(CommandError::Unexpected(
				"replayed permit was accepted".to_string(),
			))
		},
	};
	tracing::info!(%replay, "Replay rejected");

	let mut published: Vec<LedgerEvent> = Vec::new();
	while let Ok(event) = events.try_recv() {
		published.push(event);
	}

	Ok(json!({
		"token": token_address,
		"owner": owner.address(),
		"spender": spender,
		"signature": codec::to_hex(&permit.signature),
		"allowanceAfterPermit": allowance.to_string(),
		"nonceAfterPermit": next_nonce.to_string(),
		"spenderBalance": spender_balance.to_string(),
		"allowanceAfterTransfer": remaining.to_string(),
		"replay": replay,
		"events": published,
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use permit_config::builders::config::ConfigBuilder;

	#[tokio::test]
	async fn test_demo_round_trip() {
		let config = ConfigBuilder::new().build();
		let args = DemoArgs {
			value: U256::from(100u64),
			mint: U256::from(1000u64),
		};

		let report = run(&config, &args).await.unwrap();

		assert_eq!(report["allowanceAfterPermit"], "100");
		assert_eq!(report["nonceAfterPermit"], "1");
		assert_eq!(report["spenderBalance"], "100");
		assert_eq!(report["allowanceAfterTransfer"], "0");
		assert!(report["replay"].as_str().unwrap().contains("Nonce mismatch"));
		// mint, approval, accepted, transfer, rejected
		assert_eq!(report["events"].as_array().unwrap().len(), 5);
	}

	#[tokio::test]
	async fn test_demo_value_above_balance_fails() {
		let config = ConfigBuilder::new().build();
		let args = DemoArgs {
			value: U256::from(2000u64),
			mint: U256::from(1000u64),
		};

		let err = run(&config, &args).await.unwrap_err();
		assert!(matches!(
			err,
			CommandError::Token(PermitError::InsufficientBalance { .. })
		));
	}
}
