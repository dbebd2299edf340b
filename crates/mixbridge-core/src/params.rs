// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Human-readable parameter names used in validation error messages.

pub const TOKEN: &str = "token";
pub const DISTINCT_ID_IN_OPTIONS: &str = "distinctId in the options parameter";
pub const PROPERTIES_IN_OPTIONS: &str = "properties in the options parameter";
pub const DISTINCT_ID: &str = "distinctId";
pub const ALIAS: &str = "alias";
pub const EVENT_NAME: &str = "eventName";
pub const PROPERTIES: &str = "properties";
pub const PROPERTY_NAME: &str = "propertyName";
pub const PROP: &str = "prop";
pub const NAME: &str = "name";
pub const DEVICE_TOKEN: &str = "deviceToken";
pub const CHARGE: &str = "charge";
pub const PROPERTY_VALUE: &str = "property value";
