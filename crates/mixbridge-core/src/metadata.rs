// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Library metadata attached to native module initialization.

use serde_json::{Map, Value};

/// Library name reported to the native module.
pub const LIB_NAME: &str = "mixbridge-rust";
/// Library version reported to the native module.
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const LIB_NAME_KEY: &str = "$mp_lib";
pub const LIB_VERSION_KEY: &str = "$lib_version";

/// Metadata sent once with `initialize`.
///
/// The library name and version are fixed; extra fields come from the caller
/// or from configuration and can never shadow the fixed keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryMetadata {
	extra: Map<String, Value>,
}

impl LibraryMetadata {
	pub fn current() -> Self {
		Self::default()
	}

	/// Adds an extra metadata field.
	pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Adds every field from `fields`.
	pub fn with_fields<I, K, V>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		self
			.extra
			.extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
		self
	}

	/// Builds the mapping handed to the native module.
	pub fn to_map(&self) -> Map<String, Value> {
		let mut map = self.extra.clone();
		map.insert(LIB_NAME_KEY.to_string(), Value::from(LIB_NAME));
		map.insert(LIB_VERSION_KEY.to_string(), Value::from(LIB_VERSION));
		map
	}
}
