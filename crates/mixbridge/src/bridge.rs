// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The native module boundary.
//!
//! A host application exposes the platform SDK through an object implementing
//! [`NativeModule`]. The facade never talks to the SDK any other way: each public
//! operation becomes exactly one [`NativeCall`], with the project token as the
//! first positional argument.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::error::{BridgeError, MixpanelError, Result};

/// Name under which hosts register the analytics native module.
pub const NATIVE_MODULE_NAME: &str = "MixpanelReactNative";

/// The pending outcome of a forwarded call, exactly as the native module returned it.
pub type BridgeReply = BoxFuture<'static, std::result::Result<Value, BridgeError>>;

/// Functions exposed by the native module, named as the module names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeMethod {
	HasOptedOutTracking,
	OptInTracking,
	OptOutTracking,
	Identify,
	Alias,
	Track,
	RegisterSuperProperties,
	RegisterSuperPropertiesOnce,
	UnregisterSuperProperty,
	GetSuperProperties,
	ClearSuperProperties,
	TimeEvent,
	ClearTimedEvents,
	EventElapsedTime,
	Reset,
	IsIdentified,
	GetDistinctId,
	Flush,
	Set,
	SetOnce,
	TrackCharge,
	ClearCharges,
	Increment,
	Append,
	DeleteUser,
	Remove,
	Union,
	Unset,
	SetPushRegistrationId,
	GetPushRegistrationId,
	ClearPushRegistrationId,
}

impl NativeMethod {
	pub fn as_str(&self) -> &'static str {
		match self {
			NativeMethod::HasOptedOutTracking => "hasOptedOutTracking",
			NativeMethod::OptInTracking => "optInTracking",
			NativeMethod::OptOutTracking => "optOutTracking",
			NativeMethod::Identify => "identify",
			NativeMethod::Alias => "alias",
			NativeMethod::Track => "track",
			NativeMethod::RegisterSuperProperties => "registerSuperProperties",
			NativeMethod::RegisterSuperPropertiesOnce => "registerSuperPropertiesOnce",
			NativeMethod::UnregisterSuperProperty => "unregisterSuperProperty",
			NativeMethod::GetSuperProperties => "getSuperProperties",
			NativeMethod::ClearSuperProperties => "clearSuperProperties",
			NativeMethod::TimeEvent => "timeEvent",
			NativeMethod::ClearTimedEvents => "clearTimedEvents",
			NativeMethod::EventElapsedTime => "eventElapsedTime",
			NativeMethod::Reset => "reset",
			NativeMethod::IsIdentified => "isIdentified",
			NativeMethod::GetDistinctId => "getDistinctId",
			NativeMethod::Flush => "flush",
			NativeMethod::Set => "set",
			NativeMethod::SetOnce => "setOnce",
			NativeMethod::TrackCharge => "trackCharge",
			NativeMethod::ClearCharges => "clearCharges",
			NativeMethod::Increment => "increment",
			NativeMethod::Append => "append",
			NativeMethod::DeleteUser => "deleteUser",
			NativeMethod::Remove => "remove",
			NativeMethod::Union => "union",
			NativeMethod::Unset => "unset",
			NativeMethod::SetPushRegistrationId => "setPushRegistrationId",
			NativeMethod::GetPushRegistrationId => "getPushRegistrationId",
			NativeMethod::ClearPushRegistrationId => "clearPushRegistrationId",
		}
	}
}

impl fmt::Display for NativeMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One forwarded call: the method, the project token, and the normalized arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCall {
	pub method: NativeMethod,
	pub token: String,
	pub args: Vec<Value>,
}

impl NativeCall {
	/// The full positional argument list as the native function receives it.
	pub fn positional(&self) -> Vec<Value> {
		let mut out = Vec::with_capacity(self.args.len() + 1);
		out.push(Value::String(self.token.clone()));
		out.extend(self.args.iter().cloned());
		out
	}
}

/// A host-provided native analytics module.
#[async_trait]
pub trait NativeModule: Send + Sync {
	/// Prepares the SDK instance for `token`. Completes or fails exactly once.
	async fn initialize(
		&self,
		token: &str,
		opt_out_tracking_default: bool,
		metadata: Map<String, Value>,
	) -> std::result::Result<(), BridgeError>;

	/// Invokes a native function. The returned reply is handed to the caller untouched.
	fn invoke(&self, call: NativeCall) -> BridgeReply;
}

/// Host lookup of native modules by name.
pub trait NativeModules: Send + Sync {
	fn get(&self, name: &str) -> Option<Arc<dyn NativeModule>>;
}

/// A simple name-keyed set of native modules.
#[derive(Default, Clone)]
pub struct ModuleRegistry {
	modules: HashMap<String, Arc<dyn NativeModule>>,
}

impl ModuleRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(mut self, name: impl Into<String>, module: Arc<dyn NativeModule>) -> Self {
		self.modules.insert(name.into(), module);
		self
	}
}

impl NativeModules for ModuleRegistry {
	fn get(&self, name: &str) -> Option<Arc<dyn NativeModule>> {
		self.modules.get(name).cloned()
	}
}

/// Looks up the analytics module, failing loudly when the host never registered it.
pub fn resolve_native_module(host: &dyn NativeModules) -> Result<Arc<dyn NativeModule>> {
	host
		.get(NATIVE_MODULE_NAME)
		.ok_or(MixpanelError::BridgeUnavailable {
			module: NATIVE_MODULE_NAME,
		})
}
