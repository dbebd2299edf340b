// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validation error types.

use thiserror::Error;

/// Raised when an argument fails validation before reaching the native module.
///
/// Every variant carries the human-readable name of the offending parameter
/// (see [`crate::params`]) or the operation that was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// A required string was blank, or an optional string was present but blank.
	#[error("{param} is not a valid string")]
	InvalidString { param: &'static str },

	/// An object-shaped argument was not a mapping.
	#[error("{param} is not a valid object")]
	InvalidObject { param: &'static str },

	/// A value expected to be numeric did not parse as a finite number.
	#[error("{param} is not a valid number")]
	InvalidNumber { param: &'static str },

	/// The operation is restricted to Android hosts.
	#[error("{operation} is only supported on Android")]
	PlatformUnsupported { operation: &'static str },
}

/// Result type alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
