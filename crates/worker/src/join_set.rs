//! Fire-and-forget task sets.

use std::future::Future;

use tokio::task::{JoinError, JoinSet};

/// Named wrapper around a tokio [`JoinSet`] for fire-and-forget work.
///
/// Dropping the set aborts whatever is still running; nothing is awaited.
#[derive(Debug)]
pub struct WorkerJoinSet<T> {
	name: &'static str,
	inner: JoinSet<T>,
}

impl<T> WorkerJoinSet<T>
where
	T: Send + 'static,
{
	/// Creates an empty join set.
	pub fn new(name: &'static str) -> Self {
		Self { name, inner: JoinSet::new() }
	}

	/// Returns the number of tasks currently in the set.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Returns `true` if the set is empty.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Spawns a future into the set on the current runtime.
	pub fn spawn<F>(&mut self, fut: F)
	where
		F: Future<Output = T> + Send + 'static,
	{
		tracing::trace!(worker = self.name, pending = self.inner.len(), "worker.join_set.spawn");
		self.inner.spawn(fut);
	}

	/// Collects every already-finished task without waiting. Returns how many were reaped.
	pub fn reap_finished(&mut self) -> usize {
		let mut reaped = 0;
		while let Some(res) = self.inner.try_join_next() {
			reaped += 1;
			if let Some(msg) = res.err().and_then(panic_message) {
				tracing::error!(worker = self.name, panic = %msg, "worker.join_set.panicked");
			}
		}
		reaped
	}

	/// Aborts all tasks in the set.
	pub fn abort_all(&mut self) {
		if !self.inner.is_empty() {
			tracing::debug!(worker = self.name, pending = self.inner.len(), "worker.join_set.abort_all");
		}
		self.inner.abort_all();
	}
}

/// Extracts the panic payload message from a join error, `None` for cancellation.
pub fn panic_message(err: JoinError) -> Option<String> {
	if !err.is_panic() {
		return None;
	}
	let payload = err.into_panic();
	if let Some(s) = payload.downcast_ref::<&'static str>() {
		Some((*s).to_owned())
	} else if let Some(s) = payload.downcast_ref::<String>() {
		Some(s.clone())
	} else {
		Some("<non-string panic payload>".to_owned())
	}
}
