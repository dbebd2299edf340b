// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the mixbridge analytics facade.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`MIXBRIDGE_*`)
//! 2. Config file (path from `MIXBRIDGE_CONFIG`, when set)
//! 3. Built-in defaults
//!
//! # Usage
//!
//! ```ignore
//! let config = mixbridge_config::load_config()?;
//! let client = mixbridge::Mixpanel::builder()
//!     .config(&config)
//!     .native_module(module)
//!     .init()
//!     .await?;
//! ```

pub mod error;
pub mod layer;
pub mod sources;

pub use error::ConfigError;
pub use layer::{MixbridgeConfig, MixbridgeConfigLayer};
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Load configuration from all sources with standard precedence.
pub fn load_config() -> Result<MixbridgeConfig, ConfigError> {
	let env = EnvSource::process();
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource)];
	if let Some(path) = env.config_path() {
		sources.push(Box::new(TomlSource::new(path)));
	}
	sources.push(Box::new(env));
	load_from_sources(sources)
}

/// Load configuration with an explicit config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<MixbridgeConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource::process()),
	];
	load_from_sources(sources)
}

/// Merge the given sources in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<MixbridgeConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = MixbridgeConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	let config = merged.finalize();
	info!(
		has_token = config.token.is_some(),
		opt_out_tracking_default = ?config.opt_out_tracking_default,
		platform = config.platform.as_deref().unwrap_or("host"),
		"mixbridge configuration loaded"
	);
	Ok(config)
}
