//! Blockwire Decoder Configuration
//!
//! Loads decoder settings from a plain `key = value` file.
//!
//! # Format
//! ```text
//! # comment
//! definitions_dir = assets/definitions
//! ignore_server_light = true
//! dimension_min_section = -4
//! dimension_section_count = 24
//! ```
//!
//! Unknown keys are ignored. A value that does not parse keeps the key's
//! default.

use blockwire_core::{Result, WireError};
use std::fs;
use std::path::{Path, PathBuf};

/// Where [`DecoderConfig::load_default`] looks for the config file
pub const DEFAULT_CONFIG_PATH: &str = "config/decoder.txt";

/// Decoder configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Root of the per-version definition tables
    /// (`<dir>/<version name>/blocks.json`)
    pub definitions_dir: PathBuf,
    /// Namespace for bare identifiers in definition tables
    pub default_namespace: String,
    /// Skip light arrays in terrain payloads instead of storing them
    pub ignore_server_light: bool,
    /// Longest protocol string accepted, in characters
    pub max_string_length: usize,
    /// Cap on any VarInt-declared element count
    pub max_array_length: usize,

    // Dimension of the current world
    pub dimension_sky_light: bool,
    /// Lowest section index (negative from 1.18 in the overworld)
    pub dimension_min_section: i32,
    pub dimension_section_count: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            definitions_dir: PathBuf::from("assets/definitions"),
            default_namespace: "minecraft".into(),
            ignore_server_light: false,
            max_string_length: 32767,
            max_array_length: 1 << 20,
            dimension_sky_light: true,
            dimension_min_section: 0,
            dimension_section_count: 16,
        }
    }
}

impl DecoderConfig {
    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded decoder config");
        Ok(config)
    }

    /// Load [`DEFAULT_CONFIG_PATH`], or the defaults when it does not exist
    pub fn load_default() -> Result<Self> {
        if !Path::new(DEFAULT_CONFIG_PATH).exists() {
            tracing::debug!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }

    /// Parse config file content
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                config.parse_option(key.trim(), value.trim());
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn parse_option(&mut self, key: &str, value: &str) {
        match key {
            "definitions_dir" => self.definitions_dir = PathBuf::from(value),
            "default_namespace" => self.default_namespace = value.into(),
            "ignore_server_light" => {
                self.ignore_server_light = value.parse().unwrap_or(false);
            }
            "max_string_length" => {
                self.max_string_length = value.parse().unwrap_or(32767);
            }
            "max_array_length" => {
                self.max_array_length = value.parse().unwrap_or(1 << 20);
            }
            "dimension_sky_light" => {
                self.dimension_sky_light = value.parse().unwrap_or(true);
            }
            "dimension_min_section" => {
                self.dimension_min_section = value.parse().unwrap_or(0);
            }
            "dimension_section_count" => {
                self.dimension_section_count = value.parse().unwrap_or(16);
            }
            _ => {
                tracing::debug!(key, value, "unknown config option");
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.default_namespace.is_empty() || self.default_namespace.contains(':') {
            return Err(WireError::Config(format!(
                "invalid default namespace '{}'",
                self.default_namespace
            )));
        }
        if self.dimension_section_count == 0 {
            return Err(WireError::Config("dimension has no sections".into()));
        }
        Ok(())
    }

    /// Log the active configuration
    pub fn display(&self) {
        tracing::info!("Decoder configuration:");
        tracing::info!("  Definitions: {}", self.definitions_dir.display());
        tracing::info!("  Default namespace: {}", self.default_namespace);
        tracing::info!("  Ignore server light: {}", self.ignore_server_light);
        tracing::info!(
            "  Limits: {} chars per string, {} elements per array",
            self.max_string_length,
            self.max_array_length
        );
        tracing::info!(
            "  Dimension: sky light {}, sections {} from {}",
            self.dimension_sky_light,
            self.dimension_section_count,
            self.dimension_min_section
        );
    }
}
