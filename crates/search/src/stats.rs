//! Pipeline counters.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct Stats {
	pub(crate) queries_submitted: AtomicU64,
	pub(crate) refreshes_requested: AtomicU64,
	pub(crate) debounced: AtomicU64,
	pub(crate) evaluations_started: AtomicU64,
	pub(crate) published: AtomicU64,
	pub(crate) superseded: AtomicU64,
	pub(crate) timeouts: AtomicU64,
	pub(crate) failures: AtomicU64,
}

pub(crate) fn bump(counter: &AtomicU64) {
	counter.fetch_add(1, Ordering::Relaxed);
}

impl Stats {
	pub(crate) fn snapshot(&self) -> StatsSnapshot {
		let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
		StatsSnapshot {
			queries_submitted: load(&self.queries_submitted),
			refreshes_requested: load(&self.refreshes_requested),
			debounced: load(&self.debounced),
			evaluations_started: load(&self.evaluations_started),
			published: load(&self.published),
			superseded: load(&self.superseded),
			timeouts: load(&self.timeouts),
			failures: load(&self.failures),
		}
	}
}

/// Point-in-time copy of the coordinator's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
	/// Accepted `submit_query` calls.
	pub queries_submitted: u64,
	/// Accepted `request_refresh` calls.
	pub refreshes_requested: u64,
	/// Input events replaced before their quiet period elapsed.
	pub debounced: u64,
	/// Evaluations that reached the backend or the default listing.
	pub evaluations_started: u64,
	/// Evaluations whose result became the current snapshot.
	pub published: u64,
	/// Evaluations whose result was dropped because a newer one had started.
	pub superseded: u64,
	/// Backend searches that hit the ceiling.
	pub timeouts: u64,
	/// Backend searches that reported failure or dropped their completion.
	pub failures: u64,
}
