//! Broadcast bus for ledger events.

use permit_types::LedgerEvent;
use tokio::sync::broadcast;

/// Fan-out channel for [`LedgerEvent`]s.
///
/// Cloning is cheap; all clones publish to the same subscribers. Publishing
/// with no subscribers is not an error for callers, who discard the result.
#[derive(Debug, Clone)]
pub struct EventBus {
	sender: broadcast::Sender<LedgerEvent>,
}

impl EventBus {
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
		self.sender.subscribe()
	}

	pub fn publish(
		&self,
		event: LedgerEvent,
	) -> Result<usize, broadcast::error::SendError<LedgerEvent>> {
		self.sender.send(event)
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(1000)
	}
}
