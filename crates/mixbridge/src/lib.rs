// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics facade over a host-provided native SDK module.
//!
//! The native module owns batching, persistence and transport. This crate
//! validates and normalizes arguments, then forwards each operation as a single
//! call into the module.
//!
//! # Features
//!
//! - **Fail before side effects**: blank strings, non-mapping properties and
//!   non-numeric amounts are rejected before the module is called
//! - **Injected bridge**: the [`NativeModule`] is passed in, or looked up in a
//!   host [`NativeModules`] registry
//! - **Platform-aware call shapes**: list operations use the argument layout the
//!   iOS or Android module expects
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mixbridge::{Mixpanel, OptInOptions, Properties};
//!
//! let mixpanel = Mixpanel::builder()
//!     .config(&mixbridge_config::load_config()?)
//!     .native_module(Arc::new(host_module))
//!     .init()
//!     .await?;
//!
//! mixpanel.track("Opened App", None)?;
//! mixpanel.people().increment("launches")?;
//! mixpanel.people().append("tags", "beta")?;
//! let distinct_id = mixpanel.get_distinct_id()?.await?;
//! ```

mod binding;
pub mod bridge;
mod client;
mod error;
mod people;
mod shape;
pub mod testing;

pub use bridge::{
	resolve_native_module, BridgeReply, ModuleRegistry, NativeCall, NativeMethod, NativeModule,
	NativeModules, NATIVE_MODULE_NAME,
};
pub use client::{Mixpanel, MixpanelBuilder, OptInOptions, DEFAULT_OPT_OUT};
pub use error::{BridgeError, MixpanelError, Result};
pub use people::People;
pub use shape::ListCallShape;

// Re-export core types for convenience
pub use mixbridge_core::{
	params, DevicePlatform, FixedPlatform, HostPlatform, LibraryMetadata, PlatformProvider,
	Properties, PropertyInput, ValidationError,
};
