//! Consumer-side handle on the published snapshot.

use std::sync::Arc;

use roster_core::UiState;
use tokio::sync::watch;

// ─── Consumer count ──────────────────────────────────────────────────────────

/// Number of live [`StateSubscription`]s. The controller's driver watches it
/// to decide when to hold or release the storage subscription.
#[derive(Clone)]
pub(crate) struct ConsumerCount(Arc<watch::Sender<usize>>);

impl ConsumerCount {
  pub(crate) fn new() -> Self { Self(Arc::new(watch::Sender::new(0))) }

  pub(crate) fn watch(&self) -> watch::Receiver<usize> { self.0.subscribe() }

  fn acquire(&self) -> ConsumerGuard {
    self.0.send_modify(|n| *n += 1);
    ConsumerGuard(self.clone())
  }
}

struct ConsumerGuard(ConsumerCount);

impl Drop for ConsumerGuard {
  fn drop(&mut self) { self.0.0.send_modify(|n| *n = n.saturating_sub(1)); }
}

// ─── Subscription ────────────────────────────────────────────────────────────

/// An attached UI consumer.
///
/// The latest snapshot is available immediately through
/// [`current`](Self::current). While at least one subscription exists the
/// controller keeps its storage query subscribed. Cloning attaches another
/// consumer.
pub struct StateSubscription {
  receiver: watch::Receiver<UiState>,
  _guard:   ConsumerGuard,
}

impl StateSubscription {
  pub(crate) fn attach(receiver: watch::Receiver<UiState>, consumers: &ConsumerCount) -> Self {
    Self {
      receiver,
      _guard: consumers.acquire(),
    }
  }

  /// The most recently published snapshot.
  pub fn current(&self) -> UiState { self.receiver.borrow().clone() }

  /// Wait for the next snapshot. Returns `None` once the controller is gone.
  pub async fn changed(&mut self) -> Option<UiState> {
    self.receiver.changed().await.ok()?;
    Some(self.receiver.borrow_and_update().clone())
  }

  /// Wait until a snapshot satisfies `predicate`, starting with the current
  /// one. Returns `None` once the controller is gone.
  pub async fn wait_for(
    &mut self,
    mut predicate: impl FnMut(&UiState) -> bool,
  ) -> Option<UiState> {
    self
      .receiver
      .wait_for(|state| predicate(state))
      .await
      .ok()
      .map(|state| UiState::clone(&state))
  }
}

impl Clone for StateSubscription {
  fn clone(&self) -> Self {
    Self {
      receiver: self.receiver.clone(),
      _guard:   self._guard.0.acquire(),
    }
  }
}
