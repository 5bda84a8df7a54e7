use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::document::DEFAULT_OUTPUT_SUFFIX;
use crate::error::{Result, ShiftError};
use crate::timestamp::{Offset, TimestampPolicy};

/// Settings file looked up in the current directory when `--config` is absent
pub const DEFAULT_SETTINGS_FILE: &str = "subshift.toml";

fn default_output_suffix() -> String {
    DEFAULT_OUTPUT_SUFFIX.to_string()
}

/// Optional settings shared across runs, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Appended to the source file stem to name the output
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    /// Handling of timestamps shifted past midnight
    #[serde(default)]
    pub policy: TimestampPolicy,
    /// Directory for a daily rolling log file; no file logging when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_suffix: default_output_suffix(),
            policy: TimestampPolicy::default(),
            log_dir: None,
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ShiftError::Config(format!("Failed to read config file: {}", e)))?;

        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.output_suffix.contains(std::path::is_separator) {
            return Err(ShiftError::Config(format!(
                "output_suffix must not contain a path separator: {:?}",
                self.output_suffix
            )));
        }
        Ok(())
    }
}

/// Everything one run needs, built once from arguments and settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Subtitle file to shift
    pub srt_file: PathBuf,
    /// Signed shift in seconds
    pub offset_seconds: f64,
    /// Explicit destination; derived from `srt_file` when unset
    pub output: Option<PathBuf>,
    pub output_suffix: String,
    pub policy: TimestampPolicy,
}

impl Config {
    pub fn new<P: Into<PathBuf>>(srt_file: P, offset_seconds: f64) -> Self {
        Self::with_settings(srt_file, offset_seconds, &Settings::default())
    }

    pub fn with_settings<P: Into<PathBuf>>(
        srt_file: P,
        offset_seconds: f64,
        settings: &Settings,
    ) -> Self {
        Self {
            srt_file: srt_file.into(),
            offset_seconds,
            output: None,
            output_suffix: settings.output_suffix.clone(),
            policy: settings.policy,
        }
    }

    /// Validated offset; fails for NaN and infinities.
    pub fn offset(&self) -> Result<Offset> {
        Offset::from_seconds(self.offset_seconds)
    }
}
