//! Coordinator façade.

use std::sync::Arc;

use seek_worker::GenerationClock;

use crate::backend::SearchBackend;
use crate::bridge::Bridge;
use crate::config::SearchConfig;
use crate::debounce::DebounceStage;
use crate::error::{ConfigError, SubmitError};
use crate::multiplexer::{InputMultiplexer, input_multiplexer};
use crate::result::Snapshot;
use crate::slot::{ResultSlot, Subscription};
use crate::stats::{Stats, StatsSnapshot};

/// Turns a stream of query edits and refreshes into a single latest result.
///
/// Input methods never block: they record the event and return. The quiet
/// period, the backend call and its bounded wait all happen on worker tasks
/// spawned on the ambient tokio runtime, or on a shared fallback runtime when
/// the coordinator is created outside one.
///
/// Dropping the coordinator shuts it down.
pub struct SearchCoordinator<B: SearchBackend> {
	input: InputMultiplexer,
	slot: Arc<ResultSlot<B::Match>>,
	clock: GenerationClock,
	stats: Arc<Stats>,
}

impl<B: SearchBackend> SearchCoordinator<B> {
	/// Validates `config` and starts the debounce worker.
	pub fn new(backend: B, config: SearchConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self::start(backend, config))
	}

	/// Starts a coordinator with [`SearchConfig::default`].
	pub fn with_defaults(backend: B) -> Self {
		Self::start(backend, SearchConfig::default())
	}

	fn start(backend: B, config: SearchConfig) -> Self {
		let stats = Arc::new(Stats::default());
		let slot = Arc::new(ResultSlot::new());
		let clock = GenerationClock::new();
		let (input, rx) = input_multiplexer(Arc::clone(&stats));

		let bridge = Arc::new(Bridge::new(
			Arc::new(backend),
			config.timeout(),
			config.listing_prefix.clone(),
			Arc::clone(&slot),
			Arc::clone(&stats),
		));
		let stage = DebounceStage::new(rx, config.debounce(), clock.clone(), bridge, Arc::clone(&stats));
		let stage_clock = clock.clone();
		let close_input = input.closer();
		let _ = seek_worker::spawn_watched("search.debounce", stage.run(), move |_| {
			stage_clock.retire();
			close_input();
		});

		tracing::debug!(
			debounce_ms = config.debounce_ms,
			timeout_ms = config.timeout_ms,
			listing_prefix = %config.listing_prefix,
			"search.coordinator.started"
		);

		Self { input, slot, clock, stats }
	}

	/// Records `text` as the current query and schedules its evaluation.
	pub fn submit_query(&self, text: impl Into<String>) -> Result<(), SubmitError> {
		self.input.submit_query(text.into())
	}

	/// Like [`Self::submit_query`], treating absent text as a no-op.
	pub fn submit_optional_query<S: Into<String>>(&self, text: Option<S>) -> Result<(), SubmitError> {
		match text {
			Some(text) => self.submit_query(text),
			None => Ok(()),
		}
	}

	/// Schedules a re-evaluation of the current query.
	pub fn request_refresh(&self) -> Result<(), SubmitError> {
		self.input.request_refresh()
	}

	/// Returns the latest published snapshot.
	pub fn snapshot(&self) -> Snapshot<B::Match> {
		self.slot.snapshot()
	}

	/// Subscribes to snapshots, starting with the current one.
	pub fn subscribe(&self) -> Subscription<B::Match> {
		self.slot.subscribe(self.clock.clone())
	}

	/// Returns the pipeline counters.
	pub fn stats(&self) -> StatsSnapshot {
		self.stats.snapshot()
	}

	/// Returns false once [`Self::shutdown`] has been called.
	pub fn is_running(&self) -> bool {
		!self.clock.is_retired()
	}

	/// Stops accepting input and abandons in-flight evaluations without waiting.
	///
	/// The last published snapshot stays readable. Idempotent.
	pub fn shutdown(&self) {
		if self.clock.is_retired() {
			return;
		}
		self.clock.retire();
		self.input.close();
		tracing::debug!(generation = self.clock.current(), "search.coordinator.shutdown");
	}
}

impl<B: SearchBackend> Drop for SearchCoordinator<B> {
	fn drop(&mut self) {
		self.shutdown();
	}
}

impl<B: SearchBackend> std::fmt::Debug for SearchCoordinator<B> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SearchCoordinator")
			.field("running", &self.is_running())
			.field("generation", &self.clock.current())
			.field("stats", &self.stats())
			.finish_non_exhaustive()
	}
}
