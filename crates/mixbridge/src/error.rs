// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the analytics facade.

use mixbridge_config::ConfigError;
use mixbridge_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure reported by the native module itself.
///
/// Bridge failures are handed back to the caller exactly as the module produced
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct BridgeError {
	/// Module-specific error code, when the host supplies one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	pub message: String,
}

impl BridgeError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			code: None,
			message: message.into(),
		}
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());
		self
	}
}

/// Analytics facade errors.
#[derive(Debug, Error)]
pub enum MixpanelError {
	/// An argument was rejected before reaching the native module.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// No native module is registered with the host under the expected name.
	#[error(
		"mixbridge: {module} is not registered. To fix this issue try these steps:\n\
		 \u{2022} Register the {module} native module with the host bridge before initializing the client.\n\
		 \u{2022} Rebuild and re-run the app.\n\
		 \u{2022} If you are using CocoaPods on iOS, run `pod install` in the `ios` directory, then rebuild and re-run the app."
	)]
	BridgeUnavailable { module: &'static str },

	/// The native module rejected the call.
	#[error(transparent)]
	Bridge(#[from] BridgeError),

	/// Configuration could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl MixpanelError {
	/// Returns the validation failure, if this error is one.
	pub fn as_validation(&self) -> Option<&ValidationError> {
		match self {
			MixpanelError::Validation(e) => Some(e),
			_ => None,
		}
	}
}

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, MixpanelError>;
