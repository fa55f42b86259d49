//! Latest-result slot and observer subscriptions.

use futures::Stream;
use seek_worker::{GenerationClock, GenerationToken};
use tokio::sync::watch;

use crate::result::{SearchResult, Snapshot};

/// Result of offering a finished evaluation to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
	/// The result replaced the current snapshot.
	Published,
	/// A newer evaluation started (or the coordinator shut down); the result was dropped.
	Superseded,
}

/// Single cell holding the latest published snapshot.
///
/// The token check and the write happen under the watch channel's lock, and a
/// generation lower than the held one is refused, so a slow superseded
/// evaluation can never overwrite a newer result.
pub(crate) struct ResultSlot<M> {
	tx: watch::Sender<Snapshot<M>>,
}

impl<M> ResultSlot<M> {
	pub(crate) fn new() -> Self {
		let (tx, _rx) = watch::channel(Snapshot::initial());
		Self { tx }
	}

	/// Publishes `result` if `token` is still the current generation.
	pub(crate) fn publish(&self, token: &GenerationToken, result: SearchResult<M>) -> PublishOutcome {
		let generation = token.generation();
		let published = self.tx.send_if_modified(move |current| {
			if !token.is_current() || generation <= current.generation() {
				return false;
			}
			*current = Snapshot::new(generation, result);
			true
		});
		if published { PublishOutcome::Published } else { PublishOutcome::Superseded }
	}

	pub(crate) fn snapshot(&self) -> Snapshot<M> {
		self.tx.borrow().clone()
	}

	pub(crate) fn subscribe(&self, clock: GenerationClock) -> Subscription<M> {
		Subscription {
			rx: self.tx.subscribe(),
			clock,
			primed: false,
		}
	}
}

/// Lazy sequence of snapshots for one observer.
///
/// The first [`Self::next`] yields the current snapshot immediately; later
/// calls wait for the next publication. Intermediate snapshots an observer is
/// too slow to read are skipped. Ends once the coordinator shuts down.
#[derive(Debug)]
pub struct Subscription<M> {
	rx: watch::Receiver<Snapshot<M>>,
	clock: GenerationClock,
	primed: bool,
}

impl<M> Subscription<M> {
	/// Waits for the next snapshot. Returns `None` after shutdown.
	pub async fn next(&mut self) -> Option<Snapshot<M>> {
		if !self.primed {
			self.primed = true;
			let snapshot = self.rx.borrow_and_update().clone();
			return Some(snapshot);
		}

		let changed = tokio::select! {
			biased;
			res = self.rx.changed() => res.is_ok(),
			() = self.clock.retired() => false,
		};
		if !changed {
			return None;
		}
		let snapshot = self.rx.borrow_and_update().clone();
		Some(snapshot)
	}

	/// Adapts the subscription into a [`Stream`].
	pub fn into_stream(self) -> impl Stream<Item = Snapshot<M>> + Send
	where
		M: Send + Sync + 'static,
	{
		futures::stream::unfold(self, |mut sub| async move {
			let snapshot = sub.next().await?;
			Some((snapshot, sub))
		})
	}
}
