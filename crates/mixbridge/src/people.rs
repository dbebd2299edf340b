// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Profile sub-client for user records.

use std::sync::Arc;

use mixbridge_core::validate::{require_finite, require_mapping_or_absent, require_non_blank_string};
use mixbridge_core::{params, PropertyInput};
use serde_json::Value;

use crate::binding::Binding;
use crate::bridge::{BridgeReply, NativeMethod};
use crate::error::Result;

/// Updates the profile of the current user. Obtained from [`crate::Mixpanel::people`].
#[derive(Clone)]
pub struct People {
	binding: Arc<Binding>,
}

impl People {
	pub(crate) fn new(binding: Arc<Binding>) -> Self {
		Self { binding }
	}

	pub fn token(&self) -> &str {
		self.binding.token()
	}

	/// Sets profile properties, overwriting existing values.
	///
	/// Accepts a whole mapping or a single `(name, value)` pair.
	pub fn set(&self, prop: impl Into<PropertyInput>) -> Result<BridgeReply> {
		let properties = prop.into().into_assignments()?;
		Ok(self
			.binding
			.call(NativeMethod::Set, vec![Value::Object(properties)]))
	}

	/// Sets profile properties that are not already set.
	pub fn set_once(&self, prop: impl Into<PropertyInput>) -> Result<BridgeReply> {
		let properties = prop.into().into_assignments()?;
		Ok(self
			.binding
			.call(NativeMethod::SetOnce, vec![Value::Object(properties)]))
	}

	/// Records a revenue transaction.
	pub fn track_charge(&self, charge: f64, properties: Option<Value>) -> Result<BridgeReply> {
		let charge = require_finite(charge, params::CHARGE)?;
		let properties = require_mapping_or_absent(properties, params::PROPERTIES)?;
		Ok(self.binding.call(
			NativeMethod::TrackCharge,
			vec![Value::from(charge), Value::Object(properties)],
		))
	}

	pub fn clear_charges(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::ClearCharges, vec![]))
	}

	/// Adds to numeric profile properties. A bare property name increments by one.
	pub fn increment(&self, prop: impl Into<PropertyInput>) -> Result<BridgeReply> {
		let amounts = prop.into().into_increments()?;
		Ok(self
			.binding
			.call(NativeMethod::Increment, vec![Value::Object(amounts)]))
	}

	/// Appends `value` to the list property `name`.
	pub fn append(&self, name: &str, value: impl Into<Value>) -> Result<BridgeReply> {
		require_non_blank_string(name, params::NAME)?;
		let args = self.binding.list_shape().keyed(name.to_string(), value.into());
		Ok(self.binding.call(NativeMethod::Append, args))
	}

	/// Removes `value` from the list property `name`.
	pub fn remove(&self, name: &str, value: impl Into<Value>) -> Result<BridgeReply> {
		require_non_blank_string(name, params::NAME)?;
		let args = self.binding.list_shape().keyed(name.to_string(), value.into());
		Ok(self.binding.call(NativeMethod::Remove, args))
	}

	/// Adds values to the list property `name` unless already present.
	///
	/// A single non-array value is treated as a one-element list.
	pub fn union(&self, name: &str, values: impl Into<Value>) -> Result<BridgeReply> {
		require_non_blank_string(name, params::NAME)?;
		let values = match values.into() {
			Value::Array(items) => items,
			other => vec![other],
		};
		let args = self.binding.list_shape().list(name.to_string(), values);
		Ok(self.binding.call(NativeMethod::Union, args))
	}

	/// Removes a property from the profile.
	pub fn unset(&self, property_name: &str) -> Result<BridgeReply> {
		require_non_blank_string(property_name, params::PROPERTY_NAME)?;
		Ok(self
			.binding
			.call(NativeMethod::Unset, vec![Value::from(property_name)]))
	}

	/// Deletes the whole profile.
	pub fn delete_user(&self) -> Result<BridgeReply> {
		Ok(self.binding.call(NativeMethod::DeleteUser, vec![]))
	}

	/// Registers a device for push notifications.
	pub fn set_push_registration_id(&self, device_token: &str) -> Result<BridgeReply> {
		require_non_blank_string(device_token, params::DEVICE_TOKEN)?;
		Ok(self.binding.call(
			NativeMethod::SetPushRegistrationId,
			vec![Value::from(device_token)],
		))
	}

	/// Current push registration token. Android only.
	pub fn get_push_registration_id(&self) -> Result<BridgeReply> {
		self
			.binding
			.require_android(NativeMethod::GetPushRegistrationId)?;
		Ok(self
			.binding
			.call(NativeMethod::GetPushRegistrationId, vec![]))
	}

	/// Unregisters a device from push notifications.
	pub fn clear_push_registration_id(&self, device_token: &str) -> Result<BridgeReply> {
		require_non_blank_string(device_token, params::DEVICE_TOKEN)?;
		Ok(self.binding.call(
			NativeMethod::ClearPushRegistrationId,
			vec![Value::from(device_token)],
		))
	}
}

impl std::fmt::Debug for People {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("People")
			.field("token", &self.binding.token())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::MixpanelError;
	use crate::testing::RecordingBridge;
	use crate::Mixpanel;
	use mixbridge_core::{DevicePlatform, Properties, ValidationError};
	use proptest::prelude::*;
	use serde_json::json;

	fn people(platform: DevicePlatform) -> (People, Arc<RecordingBridge>) {
		let bridge = Arc::new(RecordingBridge::new());
		let client = Mixpanel::new("tok", bridge.clone(), platform).unwrap();
		(client.people().clone(), bridge)
	}

	fn validation(err: MixpanelError) -> ValidationError {
		match err {
			MixpanelError::Validation(e) => e,
			other => panic!("expected validation error, got {other:?}"),
		}
	}

	#[test]
	fn test_set_mapping_and_pair_forward_same_payload() {
		let (people, bridge) = people(DevicePlatform::Android);
		let _ = people.set(Properties::new().insert("a", 1)).unwrap();
		let _ = people.set(("a", 1)).unwrap();

		let calls = bridge.calls();
		assert_eq!(calls[0].args, vec![json!({"a": 1})]);
		assert_eq!(calls[0].args, calls[1].args);
		assert_eq!(calls[0].method, NativeMethod::Set);
	}

	#[test]
	fn test_set_once_uses_own_method() {
		let (people, bridge) = people(DevicePlatform::Ios);
		let _ = people.set_once(("first_login", "2024-05-01")).unwrap();
		let call = bridge.last_call().unwrap();
		assert_eq!(call.method, NativeMethod::SetOnce);
		assert_eq!(call.args, vec![json!({"first_login": "2024-05-01"})]);
	}

	#[test]
	fn test_set_rejects_blank_prop() {
		let (people, bridge) = people(DevicePlatform::Android);
		let err = people.set((" ", "x")).err().unwrap();
		assert_eq!(
			validation(err),
			ValidationError::InvalidString {
				param: params::PROP
			}
		);
		assert!(bridge.calls().is_empty());
	}

	#[test]
	fn test_set_from_dynamic_value() {
		let (people, bridge) = people(DevicePlatform::Android);
		let input = PropertyInput::try_from(json!({"age": 31})).unwrap();
		let _ = people.set(input).unwrap();
		assert_eq!(bridge.last_call().unwrap().args, vec![json!({"age": 31})]);
	}

	#[test]
	fn test_increment_forms() {
		let (people, bridge) = people(DevicePlatform::Android);
		let _ = people.increment("p").unwrap();
		let _ = people.increment(("p", 5)).unwrap();

		let calls = bridge.calls();
		assert_eq!(calls[0].args, vec![json!({"p": 1})]);
		assert_eq!(calls[1].args, vec![json!({"p": 5})]);

		let err = people.increment(("p", "x")).err().unwrap();
		assert_eq!(
			validation(err),
			ValidationError::InvalidNumber {
				param: params::PROPERTY_VALUE
			}
		);
		assert_eq!(bridge.calls().len(), 2);
	}

	#[test]
	fn test_track_charge() {
		let (people, bridge) = people(DevicePlatform::Ios);

		let err = people.track_charge(f64::NAN, None).err().unwrap();
		assert_eq!(
			validation(err),
			ValidationError::InvalidNumber {
				param: params::CHARGE
			}
		);
		assert!(bridge.calls().is_empty());

		let _ = people.track_charge(9.99, None).unwrap();
		assert_eq!(bridge.last_call().unwrap().args, vec![json!(9.99), json!({})]);

		let _ = people
			.track_charge(-5.0, Some(json!({"sku": "refund"})))
			.unwrap();
		assert_eq!(
			bridge.last_call().unwrap().args,
			vec![json!(-5.0), json!({"sku": "refund"})]
		);
	}

	#[test]
	fn test_track_charge_rejects_bad_properties() {
		let (people, bridge) = people(DevicePlatform::Ios);
		let err = people.track_charge(1.0, Some(json!("x"))).err().unwrap();
		assert_eq!(
			validation(err),
			ValidationError::InvalidObject {
				param: params::PROPERTIES
			}
		);
		assert!(bridge.calls().is_empty());
	}

	#[test]
	fn test_append_layout_per_platform() {
		let (ios, ios_bridge) = people(DevicePlatform::Ios);
		let _ = ios.append("tags", "x").unwrap();
		assert_eq!(ios_bridge.last_call().unwrap().args, vec![json!({"tags": "x"})]);

		let (android, android_bridge) = people(DevicePlatform::Android);
		let _ = android.append("tags", "x").unwrap();
		assert_eq!(
			android_bridge.last_call().unwrap().args,
			vec![json!("tags"), json!({"tags": "x"})]
		);
	}

	#[test]
	fn test_remove_layout_per_platform() {
		let (ios, ios_bridge) = people(DevicePlatform::Ios);
		let _ = ios.remove("tags", 3).unwrap();
		let call = ios_bridge.last_call().unwrap();
		assert_eq!(call.method, NativeMethod::Remove);
		assert_eq!(call.args, vec![json!({"tags": 3})]);

		let (other, other_bridge) = people(DevicePlatform::Unknown);
		let _ = other.remove("tags", 3).unwrap();
		assert_eq!(
			other_bridge.last_call().unwrap().args,
			vec![json!("tags"), json!({"tags": 3})]
		);
	}

	#[test]
	fn test_union_wraps_single_value() {
		let (ios, ios_bridge) = people(DevicePlatform::Ios);
		let _ = ios.union("langs", "rust").unwrap();
		assert_eq!(
			ios_bridge.last_call().unwrap().args,
			vec![json!({"langs": ["rust"]})]
		);

		let (android, android_bridge) = people(DevicePlatform::Android);
		let _ = android.union("langs", vec!["rust", "go"]).unwrap();
		assert_eq!(
			android_bridge.last_call().unwrap().args,
			vec![json!("langs"), json!(["rust", "go"])]
		);
	}

	#[test]
	fn test_list_operations_reject_blank_name() {
		let (people, bridge) = people(DevicePlatform::Android);
		for err in [
			people.append("", "x").err().unwrap(),
			people.remove(" ", "x").err().unwrap(),
			people.union("\n", "x").err().unwrap(),
		] {
			assert_eq!(
				validation(err),
				ValidationError::InvalidString {
					param: params::NAME
				}
			);
		}
		assert!(bridge.calls().is_empty());
	}

	#[test]
	fn test_unset_and_delete() {
		let (people, bridge) = people(DevicePlatform::Android);
		assert!(people.unset("").is_err());
		let _ = people.unset("plan").unwrap();
		let _ = people.delete_user().unwrap();
		let _ = people.clear_charges().unwrap();

		let calls = bridge.calls();
		assert_eq!(calls[0].method, NativeMethod::Unset);
		assert_eq!(calls[0].args, vec![json!("plan")]);
		assert_eq!(calls[1].method, NativeMethod::DeleteUser);
		assert_eq!(calls[2].method, NativeMethod::ClearCharges);
	}

	#[test]
	fn test_push_registration() {
		let (people, bridge) = people(DevicePlatform::Ios);
		let err = people.set_push_registration_id(" ").err().unwrap();
		assert_eq!(
			validation(err),
			ValidationError::InvalidString {
				param: params::DEVICE_TOKEN
			}
		);
		let _ = people.set_push_registration_id("apns-1").unwrap();
		let _ = people.clear_push_registration_id("apns-1").unwrap();
		assert_eq!(bridge.calls().len(), 2);

		let err = people.get_push_registration_id().err().unwrap();
		assert_eq!(
			validation(err),
			ValidationError::PlatformUnsupported {
				operation: "getPushRegistrationId"
			}
		);
		assert_eq!(bridge.calls().len(), 2);
	}

	#[test]
	fn test_get_push_registration_on_android() {
		let (people, bridge) = people(DevicePlatform::Android);
		let _ = people.get_push_registration_id().unwrap();
		assert_eq!(
			bridge.last_call().unwrap().method,
			NativeMethod::GetPushRegistrationId
		);
	}

	proptest! {
		#[test]
		fn test_finite_charges_forward_unchanged(charge in -1.0e9f64..1.0e9f64) {
			let (people, bridge) = people(DevicePlatform::Android);
			let _ = people.track_charge(charge, None).unwrap();
			prop_assert_eq!(bridge.last_call().unwrap().args[0].as_f64(), Some(charge));
		}

		#[test]
		fn test_blank_names_never_reach_bridge(name in "[ \t\n]{0,8}") {
			let (people, bridge) = people(DevicePlatform::Ios);
			prop_assert!(people.append(&name, "x").is_err());
			prop_assert!(people.unset(&name).is_err());
			prop_assert!(people.increment(name.as_str()).is_err());
			prop_assert!(bridge.calls().is_empty());
		}
	}
}
