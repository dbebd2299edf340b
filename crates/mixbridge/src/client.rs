// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Primary analytics client.

use std::sync::Arc;

use mixbridge_config::MixbridgeConfig;
use mixbridge_core::validate::{
	require_mapping_or_absent, require_non_blank_string, require_non_blank_string_or_absent,
};
use mixbridge_core::{
	params, DevicePlatform, FixedPlatform, HostPlatform, LibraryMetadata, PlatformProvider,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::binding::Binding;
use crate::bridge::{resolve_native_module, BridgeReply, NativeMethod, NativeModule, NativeModules};
use crate::error::{MixpanelError, Result};
use crate::people::People;

/// Opt-out state applied when the caller does not choose one.
pub const DEFAULT_OPT_OUT: bool = false;

/// Options for [`Mixpanel::opt_in_tracking`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptInOptions {
	pub distinct_id: Option<String>,
	pub properties: Option<Value>,
}

impl OptInOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn distinct_id(mut self, distinct_id: impl Into<String>) -> Self {
		self.distinct_id = Some(distinct_id.into());
		self
	}

	pub fn properties(mut self, properties: impl Into<Value>) -> Self {
		self.properties = Some(properties.into());
		self
	}
}

/// Builder for initializing a [`Mixpanel`] client.
pub struct MixpanelBuilder {
	token: Option<String>,
	opt_out_tracking_default: bool,
	metadata: LibraryMetadata,
	module: Option<Arc<dyn NativeModule>>,
	modules: Option<Arc<dyn NativeModules>>,
	platform: Arc<dyn PlatformProvider>,
}

impl MixpanelBuilder {
	pub fn new() -> Self {
		Self {
			token: None,
			opt_out_tracking_default: DEFAULT_OPT_OUT,
			metadata: LibraryMetadata::current(),
			module: None,
			modules: None,
			platform: Arc::new(HostPlatform),
		}
	}

	/// Sets the project token.
	pub fn token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());
		self
	}

	/// Starts with tracking opted out until [`Mixpanel::opt_in_tracking`] is called.
	pub fn opt_out_tracking_default(mut self, opt_out: bool) -> Self {
		self.opt_out_tracking_default = opt_out;
		self
	}

	/// Adds an extra field to the metadata sent on initialization.
	pub fn metadata_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.metadata = self.metadata.with_field(key, value);
		self
	}

	/// Uses this native module directly.
	pub fn native_module(mut self, module: Arc<dyn NativeModule>) -> Self {
		self.module = Some(module);
		self
	}

	/// Looks the native module up in the host registry at init time.
	///
	/// Ignored when [`native_module`](Self::native_module) is also set.
	pub fn native_modules(mut self, modules: Arc<dyn NativeModules>) -> Self {
		self.modules = Some(modules);
		self
	}

	/// Overrides how the host platform is identified.
	pub fn platform_provider(mut self, provider: Arc<dyn PlatformProvider>) -> Self {
		self.platform = provider;
		self
	}

	/// Applies resolved configuration.
	///
	/// Only configured values replace what the builder already holds; metadata
	/// fields are added.
	pub fn config(mut self, config: &MixbridgeConfig) -> Self {
		if let Some(token) = &config.token {
			self.token = Some(token.clone());
		}
		if let Some(opt_out) = config.opt_out_tracking_default {
			self.opt_out_tracking_default = opt_out;
		}
		if let Some(os) = &config.platform {
			self.platform = Arc::new(FixedPlatform::new(os.clone()));
		}
		self.metadata = self.metadata.with_fields(config.metadata.clone());
		self
	}

	/// Initializes the native module and returns the client.
	///
	/// Makes a single attempt. A rejection from the native module is returned
	/// unchanged.
	pub async fn init(self) -> Result<Mixpanel> {
		let module = match (self.module, self.modules) {
			(Some(module), _) => module,
			(None, Some(modules)) => resolve_native_module(modules.as_ref())?,
			(None, None) => {
				return Err(MixpanelError::BridgeUnavailable {
					module: crate::bridge::NATIVE_MODULE_NAME,
				})
			}
		};

		let token = self.token.unwrap_or_default();
		require_non_blank_string(&token, params::TOKEN)?;

		let platform = self.platform.platform();
		if let Err(e) = module
			.initialize(&token, self.opt_out_tracking_default, self.metadata.to_map())
			.await
		{
			let detail = serde_json::to_string(&e).unwrap_or_else(|_| e.to_string());
			warn!(error = %detail, "native module rejected initialize");
			return Err(MixpanelError::Bridge(e));
		}

		info!(
			platform = %platform,
			opt_out_tracking_default = self.opt_out_tracking_default,
			"analytics client initialized"
		);
		Mixpanel::new(token, module, platform)
	}
}

impl Default for MixpanelBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Analytics client bound to one project token.
///
/// Every operation validates its arguments, then makes exactly one call into
/// the native module. Validation failures are returned before the module is
/// touched. On success the module's own [`BridgeReply`] is returned unawaited.
///
/// # Example
///
/// ```ignore
/// use mixbridge::{Mixpanel, Properties};
///
/// let mixpanel = Mixpanel::builder()
///     .token("project-token")
///     .native_module(module)
///     .init()
///     .await?;
///
/// mixpanel.identify("user-42")?;
/// mixpanel.track("Checkout", Some(Properties::new().insert("total", 99.5).into()))?;
/// mixpanel.people().set(("plan", "premium"))?;
/// ```
#[derive(Clone)]
pub struct Mixpanel {
	binding: Arc<Binding>,
	people: People,
}

impl Mixpanel {
	pub fn builder() -> MixpanelBuilder {
		MixpanelBuilder::new()
	}

	/// Binds an already-initialized native module to `token`.
	pub fn new(
		token: impl Into<String>,
		module: Arc<dyn NativeModule>,
		platform: DevicePlatform,
	) -> Result<Self> {
		let token = token.into();
		require_non_blank_string(&token, params::TOKEN)?;
		let binding = Arc::new(Binding::new(token, module, platform));
		Ok(Self {
			people: People::new(binding.clone()),
			binding,
		})
	}

	pub fn token(&self) -> &str {
		self.binding.token()
	}

	pub fn platform(&self) -> DevicePlatform {
		self.binding.platform()
	}

	/// The profile sub-client bound to the same token.
	pub fn people(&self) -> &People {
		&self.people
	}

	/// Whether the current user has opted out of tracking.
	pub fn has_opted_out_tracking(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::HasOptedOutTracking, vec![]))
	}

	/// Opts a previously opted-out user back in.
	pub fn opt_in_tracking(&self, options: Option<OptInOptions>) -> Result<BridgeReply> {
		let options = options.unwrap_or_default();
		require_non_blank_string_or_absent(
			options.distinct_id.as_deref(),
			params::DISTINCT_ID_IN_OPTIONS,
		)?;
		let properties =
			require_mapping_or_absent(options.properties, params::PROPERTIES_IN_OPTIONS)?;

		let distinct_id = options.distinct_id.map_or(Value::Null, Value::String);
		Ok(self.binding.call(
			NativeMethod::OptInTracking,
			vec![distinct_id, Value::Object(properties)],
		))
	}

	/// Stops all event and profile traffic for this user.
	pub fn opt_out_tracking(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::OptOutTracking, vec![]))
	}

	/// Replaces the generated distinct id with `distinct_id`.
	pub fn identify(&self, distinct_id: &str) -> Result<BridgeReply> {
		require_non_blank_string(distinct_id, params::DISTINCT_ID)?;
		Ok(self
			.binding
			.call(NativeMethod::Identify, vec![Value::from(distinct_id)]))
	}

	/// Links `alias` to `distinct_id`.
	pub fn alias(&self, alias: &str, distinct_id: &str) -> Result<BridgeReply> {
		require_non_blank_string(alias, params::ALIAS)?;
		require_non_blank_string(distinct_id, params::DISTINCT_ID)?;
		Ok(self.binding.call(
			NativeMethod::Alias,
			vec![Value::from(alias), Value::from(distinct_id)],
		))
	}

	/// Tracks an event.
	pub fn track(&self, event_name: &str, properties: Option<Value>) -> Result<BridgeReply> {
		require_non_blank_string(event_name, params::EVENT_NAME)?;
		let properties = require_mapping_or_absent(properties, params::PROPERTIES)?;
		Ok(self.binding.call(
			NativeMethod::Track,
			vec![Value::from(event_name), Value::Object(properties)],
		))
	}

	/// Registers super properties, overwriting earlier values.
	pub fn register_super_properties(&self, properties: Option<Value>) -> Result<BridgeReply> {
		let properties = require_mapping_or_absent(properties, params::PROPERTIES)?;
		Ok(self.binding.call(
			NativeMethod::RegisterSuperProperties,
			vec![Value::Object(properties)],
		))
	}

	/// Registers super properties that are not already set.
	pub fn register_super_properties_once(&self, properties: Option<Value>) -> Result<BridgeReply> {
		let properties = require_mapping_or_absent(properties, params::PROPERTIES)?;
		Ok(self.binding.call(
			NativeMethod::RegisterSuperPropertiesOnce,
			vec![Value::Object(properties)],
		))
	}

	pub fn unregister_super_property(&self, property_name: &str) -> Result<BridgeReply> {
		require_non_blank_string(property_name, params::PROPERTY_NAME)?;
		Ok(self.binding.call(
			NativeMethod::UnregisterSuperProperty,
			vec![Value::from(property_name)],
		))
	}

	pub fn get_super_properties(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::GetSuperProperties, vec![]))
	}

	pub fn clear_super_properties(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::ClearSuperProperties, vec![]))
	}

	/// Starts a timer; the next `track` of `event_name` carries the elapsed duration.
	pub fn time_event(&self, event_name: &str) -> Result<BridgeReply> {
		require_non_blank_string(event_name, params::EVENT_NAME)?;
		Ok(self
			.binding
			.call(NativeMethod::TimeEvent, vec![Value::from(event_name)]))
	}

	pub fn clear_timed_events(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::ClearTimedEvents, vec![]))
	}

	/// Time elapsed since [`time_event`](Self::time_event) for `event_name`.
	pub fn event_elapsed_time(&self, event_name: &str) -> Result<BridgeReply> {
		require_non_blank_string(event_name, params::EVENT_NAME)?;
		Ok(self
			.binding
			.call(NativeMethod::EventElapsedTime, vec![Value::from(event_name)]))
	}

	/// Clears super properties and generates a new distinct id.
	pub fn reset(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::Reset, vec![]))
	}

	/// Whether the user has been identified. Android only.
	pub fn is_identified(&self) -> Result<BridgeReply> {
		self.binding.require_android(NativeMethod::IsIdentified)?;
		Ok(self.binding.call(NativeMethod::IsIdentified, vec![]))
	}

	pub fn get_distinct_id(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::GetDistinctId, vec![]))
	}

	/// Asks the native module to upload its queued data.
	pub fn flush(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::Flush, vec![]))
	}
}

impl std::fmt::Debug for Mixpanel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Mixpanel")
			.field("token", &self.binding.token())
			.field("platform", &self.binding.platform())
			.finish_non_exhaustive()
	}
}
