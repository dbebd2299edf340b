// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the mixbridge analytics facade.
//!
//! This crate holds everything that can be decided without talking to a native
//! module:
//!
//! - [`validate`]: non-blank string, mapping and numeric checks
//! - [`PropertyInput`]: the mapping-or-single-property argument of profile setters
//! - [`ValidationError`]: failures naming the offending parameter
//! - [`DevicePlatform`] and [`PlatformProvider`]: host platform identification
//! - [`LibraryMetadata`]: library name and version sent on initialization

pub mod error;
pub mod input;
pub mod metadata;
pub mod params;
pub mod platform;
pub mod properties;
pub mod validate;

pub use error::{Result, ValidationError};
pub use input::PropertyInput;
pub use metadata::{LibraryMetadata, LIB_NAME, LIB_VERSION};
pub use platform::{DevicePlatform, FixedPlatform, HostPlatform, PlatformProvider};
pub use properties::Properties;
