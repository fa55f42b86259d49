//! Debounce/supersede stage.
//!
//! Waits for input to stay unchanged for the quiet period, then mints a new
//! generation and hands the query to the bridge on its own task. Input that
//! arrives during the quiet period replaces the pending event before anything
//! starts. Input that arrives after an evaluation started mints a newer
//! generation later, which turns the older evaluation's eventual result into
//! a no-op; the older evaluation is abandoned, never awaited.

use std::sync::Arc;
use std::time::Duration;

use seek_worker::{GenerationClock, MailboxReceiver, WorkerJoinSet};

use crate::backend::SearchBackend;
use crate::bridge::Bridge;
use crate::multiplexer::PendingEvaluation;
use crate::stats::{Stats, bump};

/// What the backend is asked to do for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Plan {
	/// Blank input: list contacts instead of searching for nothing.
	DefaultListing,
	/// Search for the trimmed query text.
	Query(String),
}

/// One started unit of backend work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Evaluation {
	/// Query text as submitted; the published result is tagged with it.
	pub(crate) query: String,
	pub(crate) plan: Plan,
}

impl Evaluation {
	pub(crate) fn new(query: String) -> Self {
		let trimmed = query.trim();
		let plan = if trimmed.is_empty() {
			Plan::DefaultListing
		} else {
			Plan::Query(trimmed.to_owned())
		};
		Self { query, plan }
	}
}

pub(crate) struct DebounceStage<B: SearchBackend> {
	rx: MailboxReceiver<PendingEvaluation>,
	quiet: Duration,
	clock: GenerationClock,
	bridge: Arc<Bridge<B>>,
	stats: Arc<Stats>,
	inflight: WorkerJoinSet<()>,
}

impl<B: SearchBackend> DebounceStage<B> {
	pub(crate) fn new(
		rx: MailboxReceiver<PendingEvaluation>,
		quiet: Duration,
		clock: GenerationClock,
		bridge: Arc<Bridge<B>>,
		stats: Arc<Stats>,
	) -> Self {
		Self {
			rx,
			quiet,
			clock,
			bridge,
			stats,
			inflight: WorkerJoinSet::new("search.evaluate"),
		}
	}

	/// Runs until the clock is retired or the input mailbox closes.
	pub(crate) async fn run(mut self) {
		while let Some(pending) = self.next_settled().await {
			self.start(pending);
		}
		self.inflight.abort_all();
		tracing::debug!("search.debounce.stopped");
	}

	/// Waits for an event that survives its quiet period.
	async fn next_settled(&self) -> Option<PendingEvaluation> {
		let mut pending = tokio::select! {
			biased;
			() = self.clock.retired() => return None,
			next = self.rx.recv() => next?,
		};

		loop {
			tokio::select! {
				biased;
				() = self.clock.retired() => return None,
				next = self.rx.recv() => {
					let next = next?;
					bump(&self.stats.debounced);
					tracing::trace!(superseded = %pending.query, query = %next.query, "search.debounce.superseded");
					pending = next;
				}
				() = tokio::time::sleep(self.quiet) => return Some(pending),
			}
		}
	}

	fn start(&mut self, pending: PendingEvaluation) {
		self.inflight.reap_finished();
		let Some(token) = self.clock.mint() else {
			return;
		};
		bump(&self.stats.evaluations_started);

		let evaluation = Evaluation::new(pending.query);
		tracing::debug!(
			generation = token.generation(),
			origin = ?pending.origin,
			plan = ?evaluation.plan,
			inflight = self.inflight.len(),
			"search.debounce.start"
		);

		let bridge = Arc::clone(&self.bridge);
		self.inflight.spawn(async move {
			bridge.evaluate(evaluation, token).await;
		});
	}
}
