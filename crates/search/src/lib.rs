//! Debounced, cancellable query coordinator.
//!
//! Sits between high-frequency user input and a callback-based search engine:
//! * query edits and refresh pulses fan into one latest-wins mailbox
//! * a debounce stage waits for input to go quiet, then starts one evaluation
//!   under a fresh generation, superseding any evaluation still in flight
//! * a bridge waits a bounded time for the engine's completion and publishes
//!   into a single latest-result slot, unless a newer generation exists
//!
//! Failures never reach observers: timeouts and backend errors publish an
//! empty result for the query, and superseded results are dropped silently.
//!
//! ```no_run
//! use seek_search::{Completion, SearchBackend, SearchCoordinator};
//!
//! struct Contacts;
//!
//! impl SearchBackend for Contacts {
//! 	type Match = String;
//!
//! 	fn query(&self, text: &str, completion: Completion<String>) {
//! 		completion.complete(vec![format!("{text}@example")]);
//! 	}
//!
//! 	fn query_contacts(&self, prefix: &str) -> Vec<String> {
//! 		vec![format!("{prefix}1234")]
//! 	}
//! }
//!
//! let search = SearchCoordinator::with_defaults(Contacts);
//! search.submit_query("bob").unwrap();
//! let _updates = search.subscribe();
//! ```

#![warn(missing_docs)]

mod backend;
mod bridge;
pub mod config;
mod coordinator;
mod debounce;
pub mod error;
mod multiplexer;
mod result;
mod slot;
mod stats;

pub use backend::{Completion, SearchBackend};
pub use config::SearchConfig;
pub use coordinator::SearchCoordinator;
pub use error::{BackendError, ConfigError, SubmitError};
pub use result::{SearchResult, Snapshot};
pub use slot::Subscription;
pub use stats::StatsSnapshot;
