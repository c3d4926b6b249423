//! Time sources for deadline checks.
//!
//! A permit's deadline is declarative: it is compared against the clock only
//! when the permit is verified.

use permit_types::current_timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the current unix time in seconds.
pub trait Clock: Send + Sync {
	fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> u64 {
		current_timestamp()
	}
}

/// Manually driven clock, the in-process analogue of a test node's block time.
#[derive(Debug, Default)]
pub struct ManualClock {
	now: AtomicU64,
}

impl ManualClock {
	pub fn new(now: u64) -> Self {
		Self {
			now: AtomicU64::new(now),
		}
	}

	pub fn set(&self, now: u64) {
		self.now.store(now, Ordering::SeqCst);
	}

	pub fn advance(&self, seconds: u64) {
		self.now.fetch_add(seconds, Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> u64 {
		self.now.load(Ordering::SeqCst)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_manual_clock() {
		let clock = ManualClock::new(100);
		assert_eq!(clock.now(), 100);
		clock.advance(5);
		assert_eq!(clock.now(), 105);
		clock.set(7);
		assert_eq!(clock.now(), 7);
	}

	#[test]
	fn test_system_clock_is_after_2020() {
		assert!(SystemClock.now() > 1_577_836_800);
	}
}
