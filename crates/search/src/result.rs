//! Search results and the snapshots observers read.

use std::sync::Arc;

/// Matches produced by one evaluation, tagged with the query that produced them.
///
/// A new result always replaces the previous one; results are never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
	query: String,
	matches: Vec<M>,
}

impl<M> SearchResult<M> {
	/// Creates a result for `query`.
	pub fn new(query: impl Into<String>, matches: Vec<M>) -> Self {
		Self {
			query: query.into(),
			matches,
		}
	}

	/// Creates a result for `query` with no matches.
	pub fn empty(query: impl Into<String>) -> Self {
		Self::new(query, Vec::new())
	}

	/// Query text as it was submitted.
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Matches in backend order.
	pub fn matches(&self) -> &[M] {
		&self.matches
	}

	/// Number of matches.
	pub fn len(&self) -> usize {
		self.matches.len()
	}

	/// True when nothing matched.
	pub fn is_empty(&self) -> bool {
		self.matches.is_empty()
	}
}

/// Immutable published value read by observers.
///
/// `generation` is the token generation that published it; 0 marks the
/// initial sentinel that precedes any publication.
#[derive(Debug)]
pub struct Snapshot<M> {
	generation: u64,
	result: Arc<SearchResult<M>>,
}

impl<M> Clone for Snapshot<M> {
	fn clone(&self) -> Self {
		Self {
			generation: self.generation,
			result: Arc::clone(&self.result),
		}
	}
}

impl<M> Snapshot<M> {
	pub(crate) fn initial() -> Self {
		Self::new(0, SearchResult::empty(""))
	}

	pub(crate) fn new(generation: u64, result: SearchResult<M>) -> Self {
		Self {
			generation,
			result: Arc::new(result),
		}
	}

	/// Generation of the evaluation that published this snapshot.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// True for the sentinel held before anything was published.
	pub fn is_initial(&self) -> bool {
		self.generation == 0
	}

	/// Shared handle to the published result.
	pub fn result(&self) -> &Arc<SearchResult<M>> {
		&self.result
	}

	/// Query text of the published result.
	pub fn query(&self) -> &str {
		self.result.query()
	}

	/// Matches of the published result.
	pub fn matches(&self) -> &[M] {
		self.result.matches()
	}
}
