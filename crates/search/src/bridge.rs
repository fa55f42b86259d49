//! Bounded wait over the callback-style backend.
//!
//! The backend offers no cancellation, so the only way out of a search that
//! never reports is the ceiling. The synchronous contact listing runs on the
//! blocking pool and is awaited without one. Timeouts, failures, panics and
//! dropped completions all degrade to an empty result tagged with the query;
//! whether anything is published is decided solely by the evaluation's
//! generation token.

use std::sync::Arc;
use std::time::Duration;

use seek_worker::{GenerationToken, panic_message};

use crate::backend::{Completion, SearchBackend};
use crate::debounce::{Evaluation, Plan};
use crate::error::BackendError;
use crate::result::SearchResult;
use crate::slot::{PublishOutcome, ResultSlot};
use crate::stats::{Stats, bump};

pub(crate) struct Bridge<B: SearchBackend> {
	backend: Arc<B>,
	timeout: Duration,
	listing_prefix: String,
	slot: Arc<ResultSlot<B::Match>>,
	stats: Arc<Stats>,
}

impl<B: SearchBackend> Bridge<B> {
	pub(crate) fn new(
		backend: Arc<B>,
		timeout: Duration,
		listing_prefix: String,
		slot: Arc<ResultSlot<B::Match>>,
		stats: Arc<Stats>,
	) -> Self {
		Self {
			backend,
			timeout,
			listing_prefix,
			slot,
			stats,
		}
	}

	/// Runs one evaluation and makes exactly one publish-or-discard decision.
	pub(crate) async fn evaluate(&self, evaluation: Evaluation, token: GenerationToken) -> PublishOutcome {
		let reported = match &evaluation.plan {
			Plan::DefaultListing => self.list_contacts().await,
			Plan::Query(text) => self.query(text).await,
		};
		let matches = reported.unwrap_or_else(|err| {
			match err {
				BackendError::Timeout(_) => bump(&self.stats.timeouts),
				BackendError::Failed(_) | BackendError::Abandoned | BackendError::Panicked(_) => bump(&self.stats.failures),
			}
			tracing::warn!(generation = token.generation(), query = %evaluation.query, error = %err, "search.backend.degraded");
			Vec::new()
		});

		let count = matches.len();
		let outcome = self.slot.publish(&token, SearchResult::new(evaluation.query, matches));
		match outcome {
			PublishOutcome::Published => {
				bump(&self.stats.published);
				tracing::debug!(generation = token.generation(), matches = count, "search.publish");
			}
			PublishOutcome::Superseded => {
				bump(&self.stats.superseded);
				tracing::trace!(generation = token.generation(), "search.publish.superseded");
			}
		}
		outcome
	}

	/// Lists contacts on the blocking pool so a slow backend never stalls the runtime.
	async fn list_contacts(&self) -> Result<Vec<B::Match>, BackendError> {
		let backend = Arc::clone(&self.backend);
		let prefix = self.listing_prefix.clone();
		seek_worker::spawn_blocking("search.listing", move || backend.query_contacts(&prefix))
			.await
			.map_err(|err| {
				BackendError::Panicked(panic_message(err).unwrap_or_else(|| "listing task was cancelled".to_owned()))
			})
	}

	/// Starts a backend search and waits for its completion up to the ceiling.
	async fn query(&self, text: &str) -> Result<Vec<B::Match>, BackendError> {
		let (completion, rx) = Completion::channel();
		self.backend.query(text, completion);

		match tokio::time::timeout(self.timeout, rx).await {
			Ok(Ok(reported)) => reported,
			Ok(Err(_)) => Err(BackendError::Abandoned),
			Err(_) => Err(BackendError::Timeout(self.timeout)),
		}
	}
}
