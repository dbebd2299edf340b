// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory native module for tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use futures::future::{self, FutureExt};
use serde_json::{Map, Value};

use crate::bridge::{BridgeReply, NativeCall, NativeMethod, NativeModule};
use crate::error::BridgeError;

/// Arguments received by [`NativeModule::initialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct InitCall {
	pub token: String,
	pub opt_out_tracking_default: bool,
	pub metadata: Map<String, Value>,
}

/// Records every call it receives and answers with canned replies.
///
/// Calls are recorded when they are invoked, not when the reply is awaited.
/// Methods without a canned reply answer `null`.
#[derive(Debug, Default)]
pub struct RecordingBridge {
	calls: Mutex<Vec<NativeCall>>,
	inits: Mutex<Vec<InitCall>>,
	replies: Mutex<HashMap<NativeMethod, Result<Value, BridgeError>>>,
	init_failure: Mutex<Option<BridgeError>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
	m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RecordingBridge {
	pub fn new() -> Self {
		Self::default()
	}

	/// Answers every future call to `method` with `reply`.
	pub fn reply_with(&self, method: NativeMethod, reply: Result<Value, BridgeError>) {
		lock(&self.replies).insert(method, reply);
	}

	/// Makes `initialize` fail with `error`.
	pub fn fail_init_with(&self, error: BridgeError) {
		*lock(&self.init_failure) = Some(error);
	}

	pub fn calls(&self) -> Vec<NativeCall> {
		lock(&self.calls).clone()
	}

	pub fn last_call(&self) -> Option<NativeCall> {
		lock(&self.calls).last().cloned()
	}

	pub fn inits(&self) -> Vec<InitCall> {
		lock(&self.inits).clone()
	}
}

#[async_trait]
impl NativeModule for RecordingBridge {
	async fn initialize(
		&self,
		token: &str,
		opt_out_tracking_default: bool,
		metadata: Map<String, Value>,
	) -> Result<(), BridgeError> {
		lock(&self.inits).push(InitCall {
			token: token.to_string(),
			opt_out_tracking_default,
			metadata,
		});
		match lock(&self.init_failure).clone() {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}

	fn invoke(&self, call: NativeCall) -> BridgeReply {
		let reply = lock(&self.replies)
			.get(&call.method)
			.cloned()
			.unwrap_or(Ok(Value::Null));
		lock(&self.calls).push(call);
		future::ready(reply).boxed()
	}
}
