// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argument predicates and the assertions built on them.
//!
//! The `is_*` functions are pure predicates. The `require_*` functions wrap them
//! and fail with a [`ValidationError`] naming the offending parameter, so that
//! callers can bail out with `?` before anything is sent to the native module.

use serde_json::{Map, Number, Value};

use crate::error::{Result, ValidationError};

/// Returns true if the string contains at least one non-blank character.
///
/// Blank characters are the ECMAScript `\s` class: Unicode `White_Space`
/// except U+0085 NEXT LINE, plus U+FEFF BYTE ORDER MARK.
pub fn is_non_blank_string(value: &str) -> bool {
	value.chars().any(|c| !is_blank_char(c))
}

fn is_blank_char(c: char) -> bool {
	(c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Returns true if the value is absent or a non-blank string.
pub fn is_non_blank_string_or_absent(value: Option<&str>) -> bool {
	value.map_or(true, is_non_blank_string)
}

/// Returns true if the value is a key-value mapping.
pub fn is_mapping(value: &Value) -> bool {
	value.is_object()
}

/// Returns true if the value is absent, `null`, or a mapping.
///
/// `null` is accepted because it normalizes to an empty mapping in the same way
/// an absent argument does.
pub fn is_mapping_or_absent(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => true,
		Some(v) => is_mapping(v),
	}
}

/// Fails with [`ValidationError::InvalidString`] unless `value` is non-blank.
pub fn require_non_blank_string(value: &str, param: &'static str) -> Result<()> {
	if is_non_blank_string(value) {
		Ok(())
	} else {
		Err(ValidationError::InvalidString { param })
	}
}

/// Fails with [`ValidationError::InvalidString`] if `value` is present but blank.
pub fn require_non_blank_string_or_absent(value: Option<&str>, param: &'static str) -> Result<()> {
	if is_non_blank_string_or_absent(value) {
		Ok(())
	} else {
		Err(ValidationError::InvalidString { param })
	}
}

/// Validates an optional object argument and normalizes it to a plain mapping.
///
/// Absent and `null` arguments become an empty mapping.
pub fn require_mapping_or_absent(
	value: Option<Value>,
	param: &'static str,
) -> Result<Map<String, Value>> {
	if !is_mapping_or_absent(value.as_ref()) {
		return Err(ValidationError::InvalidObject { param });
	}
	match value {
		Some(Value::Object(map)) => Ok(map),
		_ => Ok(Map::new()),
	}
}

/// Fails with [`ValidationError::InvalidNumber`] unless `value` is finite.
pub fn require_finite(value: f64, param: &'static str) -> Result<f64> {
	if value.is_finite() {
		Ok(value)
	} else {
		Err(ValidationError::InvalidNumber { param })
	}
}

/// Coerces a dynamic value to a JSON number.
///
/// Numbers pass through unchanged. Strings are accepted when their trimmed
/// contents parse as a finite number; integers keep their integer form.
pub fn coerce_numeric(value: &Value, param: &'static str) -> Result<Number> {
	match value {
		Value::Number(n) => Ok(n.clone()),
		Value::String(s) => parse_number(s.trim()).ok_or(ValidationError::InvalidNumber { param }),
		_ => Err(ValidationError::InvalidNumber { param }),
	}
}

fn parse_number(s: &str) -> Option<Number> {
	if let Ok(i) = s.parse::<i64>() {
		return Some(Number::from(i));
	}
	s.parse::<f64>().ok().and_then(Number::from_f64)
}
