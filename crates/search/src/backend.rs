//! Boundary to the external search engine.
//!
//! The engine exposes a callback-style query primitive with no cancellation
//! and no progress reporting, plus a synchronous contact listing used when the
//! query is blank. [`Completion`] is the callback: it is consumed on use, so a
//! backend can report at most once.

use tokio::sync::oneshot;

use crate::error::BackendError;

pub(crate) type CompletionReceiver<M> = oneshot::Receiver<Result<Vec<M>, BackendError>>;

/// External search engine driven by the coordinator.
pub trait SearchBackend: Send + Sync + 'static {
	/// Opaque match record produced by searches and listings.
	type Match: Send + Sync + 'static;

	/// Starts a search for `text` and reports through `completion` whenever done.
	///
	/// Must return promptly; the search itself runs behind the completion. The
	/// coordinator may stop waiting before the completion fires, in which case
	/// the eventual report is ignored.
	fn query(&self, text: &str, completion: Completion<Self::Match>);

	/// Lists contacts whose id starts with `prefix`.
	fn query_contacts(&self, prefix: &str) -> Vec<Self::Match>;
}

/// One-shot completion handler handed to [`SearchBackend::query`].
///
/// Dropping it without calling [`Self::complete`] or [`Self::fail`] counts as
/// a backend failure.
#[must_use = "a dropped completion is reported as a backend failure"]
pub struct Completion<M> {
	tx: oneshot::Sender<Result<Vec<M>, BackendError>>,
}

impl<M> Completion<M> {
	pub(crate) fn channel() -> (Self, CompletionReceiver<M>) {
		let (tx, rx) = oneshot::channel();
		(Self { tx }, rx)
	}

	/// Delivers the search matches.
	pub fn complete(self, matches: Vec<M>) {
		let _ = self.tx.send(Ok(matches));
	}

	/// Reports that the search failed.
	pub fn fail(self, reason: impl Into<String>) {
		let _ = self.tx.send(Err(BackendError::Failed(reason.into())));
	}

	/// Returns true once the coordinator stopped waiting for this search.
	///
	/// Backends may use this to skip work nobody will read.
	pub fn is_abandoned(&self) -> bool {
		self.tx.is_closed()
	}
}

impl<M> std::fmt::Debug for Completion<M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Completion").field("abandoned", &self.is_abandoned()).finish()
	}
}
