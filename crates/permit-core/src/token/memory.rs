//! In-memory permit token.
//!
//! Account state (balance, nonce, allowances) is sharded per owner: each
//! owner's state sits behind its own mutex, so verification of one owner's
//! permits is linearized while different owners proceed without contention.

use crate::clock::{Clock, SystemClock};
use crate::event_bus::EventBus;
use crate::token::PermitToken;
use crate::{verify, PermitError};
use async_trait::async_trait;
use dashmap::DashMap;
use permit_types::{
	utils::compute_final_digest, Address, DomainDescriptor, LedgerEvent, SignedPermit, B256, U256,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::instrument;

#[derive(Debug, Default)]
struct AccountState {
	balance: U256,
	nonce: U256,
	allowances: HashMap<Address, U256>,
}

impl AccountState {
	fn allowance(&self, spender: &Address) -> U256 {
		self.allowances.get(spender).copied().unwrap_or_default()
	}

	/// Spends `amount` of `spender`'s allowance and debits the balance.
	///
	/// Both checks run before either field is touched. An allowance of
	/// `U256::MAX` is never decremented.
	fn debit(&mut self, owner: Address, spender: Address, amount: U256) -> Result<(), PermitError> {
		let allowance = self.allowance(&spender);
		if allowance < amount {
			return Err(PermitError::InsufficientAllowance {
				spender,
				allowance,
				needed: amount,
			});
		}
		if self.balance < amount {
			return Err(PermitError::InsufficientBalance {
				sender: owner,
				balance: self.balance,
				needed: amount,
			});
		}
		if allowance != U256::MAX {
			self.allowances.insert(spender, allowance - amount);
		}
		self.balance -= amount;
		Ok(())
	}
}

/// Permit token holding all state in process memory.
pub struct MemoryToken {
	domain: DomainDescriptor,
	/// Cached separator of `domain`.
	domain_separator: B256,
	accounts: DashMap<Address, Arc<Mutex<AccountState>>>,
	clock: Arc<dyn Clock>,
	event_bus: EventBus,
}

impl MemoryToken {
	pub fn new(domain: DomainDescriptor, clock: Arc<dyn Clock>, event_bus: EventBus) -> Self {
		let domain_separator = domain.separator();
		Self {
			domain,
			domain_separator,
			accounts: DashMap::new(),
			clock,
			event_bus,
		}
	}

	/// Token using wall-clock time and a private event bus.
	pub fn with_system_clock(domain: DomainDescriptor) -> Self {
		Self::new(domain, Arc::new(SystemClock), EventBus::default())
	}

	/// Address identifying this token (its verifying contract).
	pub fn address(&self) -> Address {
		self.domain.verifying_contract
	}

	pub fn event_bus(&self) -> &EventBus {
		&self.event_bus
	}

	/// Credits `amount` new tokens to `to`.
	pub async fn mint(&self, to: Address, amount: U256) -> Result<(), PermitError> {
		if to.is_zero() {
			return Err(PermitError::InvalidReceiver(to));
		}
		let account = self.account(to);
		let mut state = account.lock().await;
		state.balance = state
			.balance
			.checked_add(amount)
			.ok_or(PermitError::BalanceOverflow(to))?;
		drop(state);

		self.event_bus
			.publish(LedgerEvent::Transfer {
				token: self.address(),
				from: Address::ZERO,
				to,
				value: amount,
			})
			.ok();
		Ok(())
	}

	/// State handle for `owner`, created on first write.
	fn account(&self, owner: Address) -> Arc<Mutex<AccountState>> {
		Arc::clone(self.accounts.entry(owner).or_default().value())
	}

	/// State handle for `owner` if it has ever been written.
	fn existing_account(&self, owner: &Address) -> Option<Arc<Mutex<AccountState>>> {
		self.accounts.get(owner).map(|entry| Arc::clone(entry.value()))
	}

	async fn read<T>(&self, owner: &Address, f: impl FnOnce(&AccountState) -> T) -> Option<T> {
		let account = self.existing_account(owner)?;
		let state = account.lock().await;
		Some(f(&state))
	}

	/// Verification state machine for one permit attempt.
	///
	/// Signature, signer and deadline checks need no account state and run
	/// first; the nonce check and both writes happen under the owner's lock.
	async fn apply_permit(&self, permit: &SignedPermit) -> Result<(), PermitError> {
		let message = &permit.message;

		// Always the token's own domain, never a caller-supplied one.
		let digest = compute_final_digest(&self.domain_separator, &message.struct_hash());
		let signer = verify::recover_signer(&digest, &permit.signature)?;
		if signer != message.owner {
			return Err(PermitError::InvalidSigner {
				signer,
				owner: message.owner,
			});
		}

		let now = self.clock.now();
		if U256::from(now) > message.deadline {
			return Err(PermitError::Expired {
				deadline: message.deadline,
				now,
			});
		}

		if message.spender.is_zero() {
			return Err(PermitError::InvalidSpender(message.spender));
		}

		// An unknown owner's nonce is zero; only a permit that can be accepted
		// creates its entry.
		let account = match self.existing_account(&message.owner) {
			Some(account) => account,
			None if message.nonce.is_zero() => self.account(message.owner),
			None => {
				return Err(PermitError::NonceMismatch {
					owner: message.owner,
					expected: U256::ZERO,
					actual: message.nonce,
				})
			},
		};
		let mut state = account.lock().await;
		if state.nonce != message.nonce {
			return Err(PermitError::NonceMismatch {
				owner: message.owner,
				expected: state.nonce,
				actual: message.nonce,
			});
		}
		state.nonce += U256::from(1);
		state.allowances.insert(message.spender, message.value);
		drop(state);

		self.event_bus
			.publish(LedgerEvent::Approval {
				token: self.address(),
				owner: message.owner,
				spender: message.spender,
				value: message.value,
			})
			.ok();
		self.event_bus
			.publish(LedgerEvent::PermitAccepted {
				token: self.address(),
				owner: message.owner,
				spender: message.spender,
				nonce: message.nonce,
			})
			.ok();
		Ok(())
	}
}

#[async_trait]
impl PermitToken for MemoryToken {
	fn domain(&self) -> &DomainDescriptor {
		&self.domain
	}

	fn domain_separator(&self) -> B256 {
		self.domain_separator
	}

	#[instrument(skip_all, fields(
		token = %self.domain.verifying_contract,
		owner = %permit.message.owner,
		spender = %permit.message.spender,
		nonce = %permit.message.nonce,
	))]
	async fn permit(&self, permit: &SignedPermit) -> Result<(), PermitError> {
		match self.apply_permit(permit).await {
			Ok(()) => {
				tracing::info!(value = %permit.message.value, "Permit accepted");
				Ok(())
			},
			Err(e) => {
				tracing::warn!(error = %e, "Permit rejected");
				self.event_bus
					.publish(LedgerEvent::PermitRejected {
						token: self.address(),
						owner: permit.message.owner,
						reason: e.to_string(),
					})
					.ok();
				Err(e)
			},
		}
	}

	async fn nonces(&self, owner: Address) -> U256 {
		self.read(&owner, |state| state.nonce)
			.await
			.unwrap_or_default()
	}

	async fn allowance(&self, owner: Address, spender: Address) -> U256 {
		self.read(&owner, |state| state.allowance(&spender))
			.await
			.unwrap_or_default()
	}

	async fn balance_of(&self, owner: Address) -> U256 {
		self.read(&owner, |state| state.balance)
			.await
			.unwrap_or_default()
	}

	async fn approve(
		&self,
		owner: Address,
		spender: Address,
		value: U256,
	) -> Result<(), PermitError> {
		if owner.is_zero() {
			return Err(PermitError::InvalidApprover(owner));
		}
		if spender.is_zero() {
			return Err(PermitError::InvalidSpender(spender));
		}
		let account = self.account(owner);
		account.lock().await.allowances.insert(spender, value);

		tracing::debug!(%owner, %spender, %value, "Approval set");
		self.event_bus
			.publish(LedgerEvent::Approval {
				token: self.address(),
				owner,
				spender,
				value,
			})
			.ok();
		Ok(())
	}

	#[instrument(skip(self), fields(token = %self.domain.verifying_contract))]
	async fn transfer_from(
		&self,
		spender: Address,
		from: Address,
		to: Address,
		amount: U256,
	) -> Result<(), PermitError> {
		if from.is_zero() {
			return Err(PermitError::InvalidSender(from));
		}
		if to.is_zero() {
			return Err(PermitError::InvalidReceiver(to));
		}

		if from == to {
			let account = self.account(from);
			let mut state = account.lock().await;
			state.debit(from, spender, amount)?;
			// Debited just above, cannot overflow.
			state.balance += amount;
		} else {
			let from_account = self.account(from);
			let to_account = self.account(to);
			// Lock in address order so concurrent opposite transfers cannot deadlock.
			let (mut from_state, mut to_state) = if from < to {
				let f = from_account.lock().await;
				let t = to_account.lock().await;
				(f, t)
			} else {
				let t = to_account.lock().await;
				let f = from_account.lock().await;
				(f, t)
			};

			let credited = to_state
				.balance
				.checked_add(amount)
				.ok_or(PermitError::BalanceOverflow(to))?;
			from_state.debit(from, spender, amount).inspect_err(|e| {
				tracing::warn!(error = %e, "Transfer rejected");
			})?;
			to_state.balance = credited;
		}

		tracing::info!("Transfer executed");
		self.event_bus
			.publish(LedgerEvent::Transfer {
				token: self.address(),
				from,
				to,
				value: amount,
			})
			.ok();
		Ok(())
	}
}
