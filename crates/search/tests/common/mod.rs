//! Common utilities for coordinator integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use seek_search::{Completion, SearchBackend, SearchCoordinator, Snapshot};

/// Default quiet period.
pub const QUIET: Duration = Duration::from_millis(300);

/// Default backend ceiling.
pub const CEILING: Duration = Duration::from_millis(10_000);

/// How the mock reacts to one query text.
#[derive(Debug, Clone)]
pub enum Behavior {
	/// Completes inside `query` with one hit.
	Immediate,
	/// Completes with one hit after the delay.
	Delay(Duration),
	/// Keeps the completion until the test takes it.
	Hold,
	/// Reports failure.
	Fail(&'static str),
	/// Drops the completion without reporting.
	Discard,
}

#[derive(Default)]
struct MockState {
	queries: Vec<String>,
	listings: Vec<String>,
	behaviors: HashMap<String, Behavior>,
	held: Vec<(String, Completion<String>)>,
	contacts: Vec<String>,
	listing_delay: Option<Duration>,
	listing_panics: bool,
}

/// Recording search backend.
#[derive(Clone, Default)]
pub struct MockBackend {
	state: Arc<Mutex<MockState>>,
}

impl MockBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_contacts(contacts: &[&str]) -> Self {
		let backend = Self::new();
		backend.state.lock().contacts = contacts.iter().map(|c| (*c).to_owned()).collect();
		backend
	}

	/// Makes `query_contacts` block its thread for `delay` before answering.
	pub fn slow_listing(&self, delay: Duration) {
		self.state.lock().listing_delay = Some(delay);
	}

	pub fn panicking_listing(&self) {
		self.state.lock().listing_panics = true;
	}

	pub fn behave(&self, query: &str, behavior: Behavior) {
		self.state.lock().behaviors.insert(query.to_owned(), behavior);
	}

	/// Texts passed to `query`, in call order.
	pub fn queries(&self) -> Vec<String> {
		self.state.lock().queries.clone()
	}

	/// Prefixes passed to `query_contacts`, in call order.
	pub fn listings(&self) -> Vec<String> {
		self.state.lock().listings.clone()
	}

	pub fn take_held(&self) -> Vec<(String, Completion<String>)> {
		std::mem::take(&mut self.state.lock().held)
	}
}

/// The single match the mock reports for `query`.
pub fn hit(query: &str) -> String {
	format!("{query}-hit")
}

impl SearchBackend for MockBackend {
	type Match = String;

	fn query(&self, text: &str, completion: Completion<String>) {
		let mut state = self.state.lock();
		state.queries.push(text.to_owned());
		let behavior = state.behaviors.get(text).cloned().unwrap_or(Behavior::Immediate);
		match behavior {
			Behavior::Immediate => completion.complete(vec![hit(text)]),
			Behavior::Delay(delay) => {
				let text = text.to_owned();
				tokio::spawn(async move {
					tokio::time::sleep(delay).await;
					completion.complete(vec![hit(&text)]);
				});
			}
			Behavior::Hold => state.held.push((text.to_owned(), completion)),
			Behavior::Fail(reason) => completion.fail(reason),
			Behavior::Discard => drop(completion),
		}
	}

	fn query_contacts(&self, prefix: &str) -> Vec<String> {
		let (delay, panics) = {
			let mut state = self.state.lock();
			state.listings.push(prefix.to_owned());
			(state.listing_delay, state.listing_panics)
		};
		if let Some(delay) = delay {
			std::thread::sleep(delay);
		}
		assert!(!panics, "contact store unavailable");
		let state = self.state.lock();
		state.contacts.iter().filter(|c| c.starts_with(prefix)).cloned().collect()
	}
}

/// Starts a coordinator over `backend` with the default configuration.
pub fn coordinator(backend: &MockBackend) -> SearchCoordinator<MockBackend> {
	let _ = tracing_subscriber::fmt::try_init();
	SearchCoordinator::with_defaults(backend.clone())
}

/// Sleeps past one quiet period so pending input gets evaluated.
pub async fn settle() {
	tokio::time::sleep(QUIET + Duration::from_millis(50)).await;
}

/// Waits for the first snapshot published after `generation`.
///
/// Unlike [`settle`] this does not depend on timers, so it also covers work
/// running on the blocking pool.
pub async fn published_after(search: &SearchCoordinator<MockBackend>, generation: u64) -> Snapshot<String> {
	let mut updates = search.subscribe();
	loop {
		let snapshot = updates.next().await.expect("coordinator shut down while waiting");
		if snapshot.generation() > generation {
			return snapshot;
		}
	}
}
