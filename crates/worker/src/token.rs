//! Generation clock and tokens for last-started-wins publication.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Monotonic generation clock deciding which started operation is current.
///
/// Minting a token makes every previously minted token stale. Retiring the
/// clock makes every token stale and refuses further mints.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	current: Arc<AtomicU64>,
	retired: CancellationToken,
}

impl GenerationClock {
	/// Creates a clock whose first minted generation is 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Mints the next generation, superseding all earlier tokens.
	///
	/// Returns `None` once the clock is retired.
	pub fn mint(&self) -> Option<GenerationToken> {
		if self.retired.is_cancelled() {
			return None;
		}
		let generation = self.current.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
		tracing::trace!(generation, "worker.generation.mint");
		Some(GenerationToken {
			generation,
			current: Arc::clone(&self.current),
			retired: self.retired.clone(),
		})
	}

	/// Returns the most recently minted generation, 0 if none.
	pub fn current(&self) -> u64 {
		self.current.load(Ordering::Acquire)
	}

	/// Invalidates all outstanding tokens and refuses further mints.
	pub fn retire(&self) {
		self.retired.cancel();
	}

	/// Returns true once [`Self::retire`] has been called.
	pub fn is_retired(&self) -> bool {
		self.retired.is_cancelled()
	}

	/// Future resolving when the clock is retired.
	pub async fn retired(&self) {
		self.retired.cancelled().await;
	}
}

/// Marker for one started operation.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	current: Arc<AtomicU64>,
	retired: CancellationToken,
}

impl GenerationToken {
	/// Returns generation ID.
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true while no newer token was minted and the clock is not retired.
	pub fn is_current(&self) -> bool {
		!self.retired.is_cancelled() && self.current.load(Ordering::Acquire) == self.generation
	}
}
