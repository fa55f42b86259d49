//! Coordinator configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timing and fallback settings for a [`crate::SearchCoordinator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
	/// Quiet period in milliseconds input must stay unchanged before a search starts.
	#[serde(default = "default_debounce_ms")]
	pub debounce_ms: u64,
	/// Ceiling in milliseconds for one backend search to complete.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Contact id prefix listed when the query is blank.
	///
	/// Session ids start with `05`; listing by that prefix also returns
	/// contacts without a display name that have not approved us yet.
	#[serde(default = "default_listing_prefix")]
	pub listing_prefix: String,
}

/// Returns the default quiet period in milliseconds.
fn default_debounce_ms() -> u64 {
	300
}

/// Returns the default backend ceiling in milliseconds.
fn default_timeout_ms() -> u64 {
	10_000
}

fn default_listing_prefix() -> String {
	"05".to_owned()
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			debounce_ms: default_debounce_ms(),
			timeout_ms: default_timeout_ms(),
			listing_prefix: default_listing_prefix(),
		}
	}
}

impl SearchConfig {
	/// Quiet period as a [`Duration`].
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Backend ceiling as a [`Duration`].
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	/// Parses and validates a TOML document. Missing fields take their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.display(), ?config, "search.config.loaded");
		Ok(config)
	}

	/// Rejects values the coordinator cannot run with.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.timeout_ms == 0 {
			return Err(ConfigError::Invalid {
				field: "timeout_ms",
				reason: "backend ceiling must be greater than zero".to_owned(),
			});
		}
		if self.listing_prefix.trim().is_empty() {
			return Err(ConfigError::Invalid {
				field: "listing_prefix",
				reason: "contact listing prefix must not be blank".to_owned(),
			});
		}
		Ok(())
	}
}
