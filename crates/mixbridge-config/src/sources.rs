// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::MixbridgeConfigLayer;

pub const ENV_TOKEN: &str = "MIXBRIDGE_TOKEN";
pub const ENV_OPT_OUT_TRACKING_DEFAULT: &str = "MIXBRIDGE_OPT_OUT_TRACKING_DEFAULT";
pub const ENV_PLATFORM: &str = "MIXBRIDGE_PLATFORM";
pub const ENV_CONFIG_PATH: &str = "MIXBRIDGE_CONFIG";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<MixbridgeConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<MixbridgeConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(MixbridgeConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file yields an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<MixbridgeConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(MixbridgeConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: MixbridgeConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable source.
///
/// Convention: `MIXBRIDGE_<FIELD>`. Empty variables count as unset.
pub struct EnvSource {
	lookup: Lookup,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn process() -> Self {
		Self {
			lookup: Box::new(|name: &str| std::env::var(name).ok()),
		}
	}

	/// Reads from a fixed set of variables instead of the process environment.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let vars: HashMap<String, String> = pairs
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();
		Self {
			lookup: Box::new(move |name: &str| vars.get(name).cloned()),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn bool_var(&self, name: &str) -> Result<Option<bool>, ConfigError> {
		match self.var(name) {
			Some(v) => parse_bool(&v)
				.map(Some)
				.ok_or_else(|| {
					ConfigError::invalid_value(name, format!("invalid boolean value '{v}'"))
				}),
			None => Ok(None),
		}
	}

	/// Path named by `MIXBRIDGE_CONFIG`, if set.
	pub fn config_path(&self) -> Option<PathBuf> {
		self.var(ENV_CONFIG_PATH).map(PathBuf::from)
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::process()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<MixbridgeConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(MixbridgeConfigLayer {
			token: self.var(ENV_TOKEN),
			opt_out_tracking_default: self.bool_var(ENV_OPT_OUT_TRACKING_DEFAULT)?,
			platform: self.var(ENV_PLATFORM),
			metadata: Default::default(),
		})
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" => Some(true),
		"false" | "0" | "no" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_precedence_order() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}

	#[test]
	fn test_missing_file_is_empty_layer() {
		let source = TomlSource::new("/nonexistent/mixbridge.toml");
		assert_eq!(source.load().unwrap(), MixbridgeConfigLayer::default());
	}

	#[test]
	fn test_toml_source_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "token = \"from-file\"\nplatform = \"ios\"").unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		assert_eq!(layer.token.as_deref(), Some("from-file"));
		assert_eq!(layer.platform.as_deref(), Some("ios"));
	}

	#[test]
	fn test_toml_source_reports_parse_errors() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "token = [unterminated").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_env_source_reads_vars() {
		let source = EnvSource::from_pairs([
			(ENV_TOKEN, "env-token"),
			(ENV_OPT_OUT_TRACKING_DEFAULT, "true"),
			(ENV_PLATFORM, "android"),
		]);
		let layer = source.load().unwrap();
		assert_eq!(layer.token.as_deref(), Some("env-token"));
		assert_eq!(layer.opt_out_tracking_default, Some(true));
		assert_eq!(layer.platform.as_deref(), Some("android"));
	}

	#[test]
	fn test_env_source_ignores_empty_vars() {
		let source = EnvSource::from_pairs([(ENV_TOKEN, "")]);
		assert!(source.load().unwrap().token.is_none());
	}

	#[test]
	fn test_env_source_rejects_bad_bool() {
		let source = EnvSource::from_pairs([(ENV_OPT_OUT_TRACKING_DEFAULT, "maybe")]);
		let err = source.load().unwrap_err();
		assert!(matches!(
			err,
			ConfigError::InvalidValue { ref key, .. } if key == ENV_OPT_OUT_TRACKING_DEFAULT
		));
	}

	#[test]
	fn test_parse_bool_variants() {
		assert_eq!(parse_bool("TRUE"), Some(true));
		assert_eq!(parse_bool(" 1 "), Some(true));
		assert_eq!(parse_bool("no"), Some(false));
		assert_eq!(parse_bool("0"), Some(false));
		assert_eq!(parse_bool("off"), None);
	}

	#[test]
	fn test_config_path_from_env() {
		let source = EnvSource::from_pairs([(ENV_CONFIG_PATH, "/etc/mixbridge.toml")]);
		assert_eq!(
			source.config_path(),
			Some(PathBuf::from("/etc/mixbridge.toml"))
		);
	}
}
