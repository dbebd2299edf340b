// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One layer of configuration. Unset fields leave lower layers untouched.
///
/// TOML shape:
///
/// ```toml
/// token = "project-token"
/// opt_out_tracking_default = false
/// platform = "android"
///
/// [metadata]
/// "$wrapper" = "tauri"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MixbridgeConfigLayer {
	pub token: Option<String>,
	pub opt_out_tracking_default: Option<bool>,
	pub platform: Option<String>,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub metadata: BTreeMap<String, String>,
}

impl MixbridgeConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.token.is_some() {
			self.token = other.token;
		}
		if other.opt_out_tracking_default.is_some() {
			self.opt_out_tracking_default = other.opt_out_tracking_default;
		}
		if other.platform.is_some() {
			self.platform = other.platform;
		}
		self.metadata.extend(other.metadata);
	}

	pub fn finalize(self) -> MixbridgeConfig {
		MixbridgeConfig {
			token: self.token,
			opt_out_tracking_default: self.opt_out_tracking_default,
			platform: self.platform,
			metadata: self.metadata,
		}
	}
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MixbridgeConfig {
	/// Project token. Validated by the client, not here.
	pub token: Option<String>,
	/// Initial opt-out state; the client default applies when unset.
	pub opt_out_tracking_default: Option<bool>,
	/// Host OS override; the real host OS is used when unset.
	pub platform: Option<String>,
	/// Extra fields sent with the library metadata on initialization.
	pub metadata: BTreeMap<String, String>,
}
