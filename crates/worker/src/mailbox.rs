//! Latest-wins mailbox with synchronous producers and an async consumer.
//!
//! The mailbox holds at most one undelivered message: a send replaces
//! whatever the consumer has not taken yet. Producers never suspend, so a
//! sender can be driven from UI threads that are not running inside tokio.
//! The consumer side awaits new messages through a [`Notify`].

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

/// Outcome from enqueueing a mailbox message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxSendOutcome {
	/// Nothing was waiting; the message was stored.
	Enqueued,
	/// An undelivered message was replaced by this one.
	Coalesced,
}

/// Mailbox send error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MailboxSendError {
	/// Mailbox is closed.
	#[error("mailbox is closed")]
	Closed,
}

struct MailboxState<T> {
	pending: Option<T>,
	closed: bool,
}

struct MailboxInner<T> {
	state: Mutex<MailboxState<T>>,
	notify_recv: Notify,
}

/// Multi-producer mailbox sender.
pub struct MailboxSender<T> {
	inner: Arc<MailboxInner<T>>,
}

/// Single-consumer mailbox receiver.
pub struct MailboxReceiver<T> {
	inner: Arc<MailboxInner<T>>,
}

impl<T> Clone for MailboxSender<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> std::fmt::Debug for MailboxSender<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MailboxSender").finish_non_exhaustive()
	}
}

impl<T> std::fmt::Debug for MailboxReceiver<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MailboxReceiver").finish_non_exhaustive()
	}
}

/// Creates a latest-wins mailbox and returns its sender and receiver halves.
pub fn mailbox<T>() -> (MailboxSender<T>, MailboxReceiver<T>) {
	let inner = Arc::new(MailboxInner {
		state: Mutex::new(MailboxState {
			pending: None,
			closed: false,
		}),
		notify_recv: Notify::new(),
	});
	(
		MailboxSender {
			inner: Arc::clone(&inner),
		},
		MailboxReceiver { inner },
	)
}

impl<T> MailboxSender<T> {
	/// Stores one message, replacing any undelivered one. Never blocks.
	pub fn send(&self, msg: T) -> Result<MailboxSendOutcome, MailboxSendError> {
		let mut state = self.inner.state.lock();
		if state.closed {
			return Err(MailboxSendError::Closed);
		}
		let outcome = match state.pending.replace(msg) {
			Some(_) => MailboxSendOutcome::Coalesced,
			None => MailboxSendOutcome::Enqueued,
		};
		drop(state);

		self.inner.notify_recv.notify_one();
		Ok(outcome)
	}

	/// Closes the mailbox. The receiver takes a pending message then returns `None`.
	pub fn close(&self) {
		let mut state = self.inner.state.lock();
		state.closed = true;
		drop(state);
		self.inner.notify_recv.notify_waiters();
	}
}

impl<T> MailboxReceiver<T> {
	/// Receives one message. Returns `None` once the mailbox is closed and drained.
	///
	/// Cancel safe: a message is only taken in the poll that returns it.
	pub async fn recv(&self) -> Option<T> {
		loop {
			// Register interest before inspecting the state so a close that
			// lands between the check and the await still wakes us.
			let notified = self.inner.notify_recv.notified();
			tokio::pin!(notified);
			notified.as_mut().enable();

			{
				let mut state = self.inner.state.lock();
				if let Some(msg) = state.pending.take() {
					return Some(msg);
				}
				if state.closed {
					return None;
				}
			}

			notified.await;
		}
	}
}
