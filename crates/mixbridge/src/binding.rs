// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! State shared by a client and its profile sub-client.

use std::sync::Arc;

use mixbridge_core::{DevicePlatform, ValidationError};
use serde_json::Value;
use tracing::debug;

use crate::bridge::{BridgeReply, NativeCall, NativeMethod, NativeModule};
use crate::shape::ListCallShape;

/// A token bound to a native module on a known platform. Immutable.
pub(crate) struct Binding {
	token: String,
	module: Arc<dyn NativeModule>,
	platform: DevicePlatform,
	list_shape: ListCallShape,
}

impl Binding {
	pub(crate) fn new(
		token: String,
		module: Arc<dyn NativeModule>,
		platform: DevicePlatform,
	) -> Self {
		Self {
			token,
			module,
			platform,
			list_shape: ListCallShape::for_platform(platform),
		}
	}

	pub(crate) fn token(&self) -> &str {
		&self.token
	}

	pub(crate) fn platform(&self) -> DevicePlatform {
		self.platform
	}

	pub(crate) fn list_shape(&self) -> ListCallShape {
		self.list_shape
	}

	/// Refuses Android-only operations on every other platform.
	pub(crate) fn require_android(&self, method: NativeMethod) -> Result<(), ValidationError> {
		if self.platform == DevicePlatform::Android {
			Ok(())
		} else {
			Err(ValidationError::PlatformUnsupported {
				operation: method.as_str(),
			})
		}
	}

	/// Forwards one call with the token prepended.
	pub(crate) fn call(&self, method: NativeMethod, args: Vec<Value>) -> BridgeReply {
		debug!(
			method = method.as_str(),
			platform = %self.platform,
			arg_count = args.len(),
			"forwarding call to native module"
		);
		self.module.invoke(NativeCall {
			method,
			token: self.token.clone(),
			args,
		})
	}
}
