// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argument layout for list-valued profile operations.
//!
//! The iOS and Android native modules disagree on how `append`, `remove` and
//! `union` receive their payload. The layout is picked once per client from the
//! host platform.

use mixbridge_core::DevicePlatform;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCallShape {
	/// A single `{name: payload}` mapping.
	Combined,
	/// The property name, then the payload.
	Split,
}

impl ListCallShape {
	pub fn for_platform(platform: DevicePlatform) -> Self {
		match platform {
			DevicePlatform::Ios => ListCallShape::Combined,
			DevicePlatform::Android | DevicePlatform::Unknown => ListCallShape::Split,
		}
	}

	/// Arguments for `append` and `remove`.
	///
	/// Split layout sends the name followed by the `{name: value}` mapping.
	pub fn keyed(&self, name: String, value: Value) -> Vec<Value> {
		match self {
			ListCallShape::Combined => vec![single(name, value)],
			ListCallShape::Split => vec![Value::String(name.clone()), single(name, value)],
		}
	}

	/// Arguments for `union`.
	///
	/// Split layout sends the name followed by the bare values array.
	pub fn list(&self, name: String, values: Vec<Value>) -> Vec<Value> {
		match self {
			ListCallShape::Combined => vec![single(name, Value::Array(values))],
			ListCallShape::Split => vec![Value::String(name), Value::Array(values)],
		}
	}
}

fn single(name: String, value: Value) -> Value {
	let mut map = Map::new();
	map.insert(name, value);
	Value::Object(map)
}
