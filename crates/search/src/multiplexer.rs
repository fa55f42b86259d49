//! Fan-in of query edits and refresh pulses.
//!
//! Both sources feed one latest-wins mailbox, so the debounce stage only ever
//! sees "the query that should currently be evaluated".

use std::sync::Arc;

use parking_lot::Mutex;
use seek_worker::{MailboxReceiver, MailboxSendOutcome, MailboxSender, mailbox};

use crate::error::SubmitError;
use crate::stats::{Stats, bump};

/// Which input produced a pending evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
	/// A query edit.
	Query,
	/// A refresh of the last recorded query.
	Refresh,
}

/// Query text waiting for its quiet period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEvaluation {
	/// Query text as submitted.
	pub query: String,
	/// Input that produced this event.
	pub origin: Origin,
}

pub(crate) struct InputMultiplexer {
	/// Last submitted query. Held while enqueueing so a concurrent refresh
	/// cannot enqueue text older than what is already queued.
	latest: Mutex<String>,
	tx: MailboxSender<PendingEvaluation>,
	stats: Arc<Stats>,
}

pub(crate) fn input_multiplexer(stats: Arc<Stats>) -> (InputMultiplexer, MailboxReceiver<PendingEvaluation>) {
	let (tx, rx) = mailbox();
	let input = InputMultiplexer {
		latest: Mutex::new(String::new()),
		tx,
		stats,
	};
	(input, rx)
}

impl InputMultiplexer {
	/// Records `text` as the latest query and emits it.
	pub(crate) fn submit_query(&self, text: String) -> Result<(), SubmitError> {
		let mut latest = self.latest.lock();
		self.enqueue(PendingEvaluation {
			query: text.clone(),
			origin: Origin::Query,
		})?;
		*latest = text;
		bump(&self.stats.queries_submitted);
		Ok(())
	}

	/// Re-emits the latest recorded query, or the empty string if none was submitted.
	pub(crate) fn request_refresh(&self) -> Result<(), SubmitError> {
		let latest = self.latest.lock();
		self.enqueue(PendingEvaluation {
			query: latest.clone(),
			origin: Origin::Refresh,
		})?;
		bump(&self.stats.refreshes_requested);
		Ok(())
	}

	/// Stops accepting input. The receiver drains then ends.
	pub(crate) fn close(&self) {
		self.tx.close();
	}

	/// Returns a callback that closes the input from another task.
	pub(crate) fn closer(&self) -> impl FnOnce() + Send + 'static {
		let tx = self.tx.clone();
		move || tx.close()
	}

	fn enqueue(&self, pending: PendingEvaluation) -> Result<(), SubmitError> {
		let origin = pending.origin;
		match self.tx.send(pending)? {
			MailboxSendOutcome::Coalesced => {
				bump(&self.stats.debounced);
				tracing::trace!(?origin, "search.input.coalesced");
			}
			MailboxSendOutcome::Enqueued => tracing::trace!(?origin, "search.input.enqueued"),
		}
		Ok(())
	}
}
