// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Variant argument accepted by profile setters and counters.

use serde_json::{Map, Number, Value};

use crate::error::{Result, ValidationError};
use crate::params;
use crate::properties::Properties;
use crate::validate::{coerce_numeric, require_non_blank_string};

/// Either a full property mapping or a single named property.
///
/// ```
/// use mixbridge_core::{Properties, PropertyInput};
///
/// let whole: PropertyInput = Properties::new().insert("plan", "pro").into();
/// let single: PropertyInput = ("plan", "pro").into();
/// assert_eq!(whole.into_assignments(), single.into_assignments());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyInput {
	Mapping(Map<String, Value>),
	KeyValue { name: String, value: Option<Value> },
}

impl PropertyInput {
	/// A single property with no explicit value.
	pub fn key(name: impl Into<String>) -> Self {
		PropertyInput::KeyValue {
			name: name.into(),
			value: None,
		}
	}

	/// A single property with a value.
	pub fn key_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
		PropertyInput::KeyValue {
			name: name.into(),
			value: Some(value.into()),
		}
	}

	/// Normalizes to the mapping forwarded by `set` and `set_once`.
	///
	/// A single property without a value is assigned `null`.
	pub fn into_assignments(self) -> Result<Map<String, Value>> {
		match self {
			PropertyInput::Mapping(map) => Ok(map),
			PropertyInput::KeyValue { name, value } => {
				require_non_blank_string(&name, params::PROP)?;
				let mut map = Map::new();
				map.insert(name, value.unwrap_or(Value::Null));
				Ok(map)
			}
		}
	}

	/// Normalizes to the mapping forwarded by `increment`.
	///
	/// Every amount is coerced to a number. A single property without an amount
	/// (or with a `null` amount) is incremented by one.
	pub fn into_increments(self) -> Result<Map<String, Value>> {
		match self {
			PropertyInput::Mapping(map) => map
				.into_iter()
				.map(|(key, val)| {
					coerce_numeric(&val, params::PROPERTY_VALUE).map(|n| (key, Value::Number(n)))
				})
				.collect(),
			PropertyInput::KeyValue { name, value } => {
				let amount = match value {
					None | Some(Value::Null) => Number::from(1),
					Some(v) => coerce_numeric(&v, params::PROPERTY_VALUE)?,
				};
				require_non_blank_string(&name, params::NAME)?;
				let mut map = Map::new();
				map.insert(name, Value::Number(amount));
				Ok(map)
			}
		}
	}
}

impl From<Map<String, Value>> for PropertyInput {
	fn from(map: Map<String, Value>) -> Self {
		PropertyInput::Mapping(map)
	}
}

impl From<Properties> for PropertyInput {
	fn from(props: Properties) -> Self {
		PropertyInput::Mapping(props.into_map())
	}
}

impl From<&str> for PropertyInput {
	fn from(name: &str) -> Self {
		PropertyInput::key(name)
	}
}

impl From<String> for PropertyInput {
	fn from(name: String) -> Self {
		PropertyInput::key(name)
	}
}

impl<K, V> From<(K, V)> for PropertyInput
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from((name, value): (K, V)) -> Self {
		PropertyInput::key_value(name, value)
	}
}

/// Accepts a JSON object or a property name; every other shape is refused
/// rather than silently forwarded as an empty mapping.
impl TryFrom<Value> for PropertyInput {
	type Error = ValidationError;

	fn try_from(value: Value) -> Result<Self> {
		match value {
			Value::Object(map) => Ok(PropertyInput::Mapping(map)),
			Value::String(name) => Ok(PropertyInput::key(name)),
			_ => Err(ValidationError::InvalidObject { param: params::PROP }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	fn map(value: Value) -> Map<String, Value> {
		match value {
			Value::Object(m) => m,
			other => panic!("expected object, got {other}"),
		}
	}

	#[test]
	fn test_mapping_and_key_value_assign_identically() {
		let whole = PropertyInput::from(map(json!({"a": 1}))).into_assignments().unwrap();
		let single = PropertyInput::from(("a", 1)).into_assignments().unwrap();
		assert_eq!(whole, single);
		assert_eq!(Value::Object(single), json!({"a": 1}));
	}

	#[test]
	fn test_key_without_value_assigns_null() {
		let out = PropertyInput::key("nickname").into_assignments().unwrap();
		assert_eq!(Value::Object(out), json!({"nickname": null}));
	}

	#[test]
	fn test_blank_key_is_rejected_for_assignment() {
		let err = PropertyInput::from(("  ", "x")).into_assignments().unwrap_err();
		assert_eq!(err, ValidationError::InvalidString { param: params::PROP });
	}

	#[test]
	fn test_empty_mapping_passes_through() {
		let out = PropertyInput::Mapping(Map::new()).into_assignments().unwrap();
		assert!(out.is_empty());
	}

	#[test]
	fn test_increment_defaults_to_one() {
		let out = PropertyInput::key("logins").into_increments().unwrap();
		assert_eq!(Value::Object(out), json!({"logins": 1}));

		let out = PropertyInput::key_value("logins", Value::Null)
			.into_increments()
			.unwrap();
		assert_eq!(Value::Object(out), json!({"logins": 1}));
	}

	#[test]
	fn test_increment_keeps_explicit_amounts() {
		let out = PropertyInput::from(("p", 5)).into_increments().unwrap();
		assert_eq!(Value::Object(out), json!({"p": 5}));

		let out = PropertyInput::from(("p", 0)).into_increments().unwrap();
		assert_eq!(Value::Object(out), json!({"p": 0}));

		let out = PropertyInput::from(("p", -1.5)).into_increments().unwrap();
		assert_eq!(Value::Object(out), json!({"p": -1.5}));
	}

	#[test]
	fn test_increment_rejects_non_numeric_amount() {
		let err = PropertyInput::from(("p", "x")).into_increments().unwrap_err();
		assert_eq!(
			err,
			ValidationError::InvalidNumber {
				param: params::PROPERTY_VALUE
			}
		);
	}

	#[test]
	fn test_increment_mapping_coerces_numeric_strings() {
		let out = PropertyInput::from(map(json!({"a": "2", "b": 3.5})))
			.into_increments()
			.unwrap();
		assert_eq!(Value::Object(out), json!({"a": 2, "b": 3.5}));
	}

	#[test]
	fn test_increment_mapping_rejects_any_bad_entry() {
		let err = PropertyInput::from(map(json!({"a": 1, "b": "nope"})))
			.into_increments()
			.unwrap_err();
		assert_eq!(
			err,
			ValidationError::InvalidNumber {
				param: params::PROPERTY_VALUE
			}
		);
	}

	#[test]
	fn test_increment_checks_amount_before_name() {
		let err = PropertyInput::from(("", "x")).into_increments().unwrap_err();
		assert!(matches!(err, ValidationError::InvalidNumber { .. }));

		let err = PropertyInput::key(" ").into_increments().unwrap_err();
		assert_eq!(err, ValidationError::InvalidString { param: params::NAME });
	}

	#[test]
	fn test_try_from_value_accepts_object_and_string() {
		assert_eq!(
			PropertyInput::try_from(json!({"k": true})).unwrap(),
			PropertyInput::Mapping(map(json!({"k": true})))
		);
		assert_eq!(
			PropertyInput::try_from(json!("k")).unwrap(),
			PropertyInput::key("k")
		);
	}

	#[test]
	fn test_try_from_value_rejects_other_shapes() {
		for bad in [json!(1), json!([1, 2]), json!(null), json!(false)] {
			let err = PropertyInput::try_from(bad).unwrap_err();
			assert_eq!(err, ValidationError::InvalidObject { param: params::PROP });
		}
	}

	proptest! {
		#[test]
		fn test_single_integer_increment_forwards_amount(
			name in "[a-z_]{1,16}",
			by in -10_000i64..10_000,
		) {
			let out = PropertyInput::from((name.clone(), by)).into_increments().unwrap();
			prop_assert_eq!(out.get(&name), Some(&json!(by)));
			prop_assert_eq!(out.len(), 1);
		}

		#[test]
		fn test_single_assignment_matches_mapping(
			name in "[a-z_]{1,16}",
			value in "[a-zA-Z0-9 ]{0,24}",
		) {
			let mut m = Map::new();
			m.insert(name.clone(), json!(value.clone()));
			let whole = PropertyInput::from(m).into_assignments().unwrap();
			let single = PropertyInput::from((name, value)).into_assignments().unwrap();
			prop_assert_eq!(whole, single);
		}
	}
}
