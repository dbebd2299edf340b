// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host platform identification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The platform family a native module runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlatform {
	Android,
	Ios,
	Unknown,
}

impl DevicePlatform {
	/// Maps a host-reported OS name to a platform family.
	///
	/// Matching is exact and case-sensitive, mirroring the names hosts report
	/// (`"android"`, `"ios"`).
	pub fn from_os(os: &str) -> Self {
		match os {
			"android" => DevicePlatform::Android,
			"ios" => DevicePlatform::Ios,
			_ => DevicePlatform::Unknown,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			DevicePlatform::Android => "android",
			DevicePlatform::Ios => "ios",
			DevicePlatform::Unknown => "unknown",
		}
	}
}

impl fmt::Display for DevicePlatform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Reports the operating system name of the host process.
pub trait PlatformProvider: Send + Sync {
	fn os(&self) -> String;

	fn platform(&self) -> DevicePlatform {
		DevicePlatform::from_os(&self.os())
	}
}

/// Uses the compile-time target OS of the running binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformProvider for HostPlatform {
	fn os(&self) -> String {
		std::env::consts::OS.to_string()
	}
}

/// Reports a fixed OS name, regardless of the real host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPlatform(String);

impl FixedPlatform {
	pub fn new(os: impl Into<String>) -> Self {
		Self(os.into())
	}

	pub fn android() -> Self {
		Self::new("android")
	}

	pub fn ios() -> Self {
		Self::new("ios")
	}
}

impl PlatformProvider for FixedPlatform {
	fn os(&self) -> String {
		self.0.clone()
	}
}
