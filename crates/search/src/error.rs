//! Error types for the search coordinator.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Why a backend evaluation produced no matches.
///
/// Never surfaced to observers: every variant degrades to an empty,
/// query-tagged result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
	/// The completion handler did not fire within the ceiling.
	#[error("search backend did not complete within {0:?}")]
	Timeout(Duration),
	/// The backend reported a failure through its completion handler.
	#[error("search backend failed: {0}")]
	Failed(String),
	/// The backend dropped its completion handler without invoking it.
	#[error("search backend dropped its completion handler")]
	Abandoned,
	/// The backend panicked while listing contacts.
	#[error("contact listing panicked: {0}")]
	Panicked(String),
}

/// Input rejected by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
	/// The coordinator was shut down and accepts no further input.
	#[error("search coordinator is shut down")]
	ShutDown,
}

impl From<seek_worker::MailboxSendError> for SubmitError {
	fn from(err: seek_worker::MailboxSendError) -> Self {
		match err {
			seek_worker::MailboxSendError::Closed => Self::ShutDown,
		}
	}
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Read {
		/// Path that was read.
		path: PathBuf,
		/// Underlying I/O error.
		source: io::Error,
	},
	/// The configuration is not valid TOML for [`crate::SearchConfig`].
	#[error("invalid search config: {0}")]
	Parse(#[from] toml::de::Error),
	/// A field holds a value the coordinator cannot run with.
	#[error("invalid value for `{field}`: {reason}")]
	Invalid {
		/// Offending field name.
		field: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
}
