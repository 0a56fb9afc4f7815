//! Tunable thresholds of the locator.
//!
//! Every field has a working default. A config can
//! be loaded from JSON (missing keys fall back to defaults) and then have
//! `BARCODE_*` environment variables layered on top.

use crate::error::{LocateError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Width of one orientation histogram bin in degrees
pub const ANGLE_BIN_WIDTH_DEGREES: f32 = 5.0;

/// Number of bins covering `[-90, 90)`
pub const ANGLE_BINS: usize = 36;

fn parse_env_f32(value: Option<String>, default: f32) -> f32 {
    value
        .and_then(|v| v.trim().parse::<f32>().ok())
        .unwrap_or(default)
}

fn parse_env_usize(value: Option<String>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(value: Option<String>, default: bool) -> bool {
    value
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

/// Locator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Minimum long/short axis ratio for a shape to count as a bar
    pub elongation_threshold: f32,
    /// A cluster or candidate must hold strictly more rectangles than this
    pub minimum_group_mass: usize,
    /// Fraction of the mean bar length used as the linking radius
    pub proximity_multiplier: f32,
    /// Log per-stage elapsed time at info level
    pub runtime_reporting: bool,
    /// Fewer normalized rectangles than this ends the run early
    pub min_input_rects: usize,
    /// Consecutive rectangles merge when their center distance is below
    /// `(width_a + width_b) / merge_divisor`
    pub merge_divisor: f32,
    /// Apply the sharpening kernel before binarization
    pub sharpen: bool,
    /// Smallest dark region (pixels) handed to the core
    pub min_region_area: usize,
    /// Largest dark region as a fraction of the image area
    pub max_region_fraction: f32,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            elongation_threshold: 3.0,
            minimum_group_mass: 8,
            proximity_multiplier: 0.5,
            runtime_reporting: false,
            min_input_rects: 10,
            merge_divisor: 4.0,
            sharpen: true,
            min_region_area: 50,
            max_region_fraction: 0.02,
        }
    }
}

impl LocatorConfig {
    /// Overlay `BARCODE_*` environment variables on this config
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`, keyed by `BARCODE_*` variable name.
    /// Missing or unparsable values keep the current setting.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.elongation_threshold = parse_env_f32(
            lookup("BARCODE_ELONGATION_THRESHOLD"),
            self.elongation_threshold,
        );
        self.minimum_group_mass =
            parse_env_usize(lookup("BARCODE_MIN_GROUP_MASS"), self.minimum_group_mass);
        self.proximity_multiplier = parse_env_f32(
            lookup("BARCODE_PROXIMITY_MULTIPLIER"),
            self.proximity_multiplier,
        );
        self.runtime_reporting =
            parse_env_bool_u8(lookup("BARCODE_RUNTIME_REPORTING"), self.runtime_reporting);
        self.min_input_rects =
            parse_env_usize(lookup("BARCODE_MIN_INPUT_RECTS"), self.min_input_rects);
        self.merge_divisor = parse_env_f32(lookup("BARCODE_MERGE_DIVISOR"), self.merge_divisor);
        self.sharpen = parse_env_bool_u8(lookup("BARCODE_SHARPEN"), self.sharpen);
        self.min_region_area =
            parse_env_usize(lookup("BARCODE_MIN_REGION_AREA"), self.min_region_area);
        self.max_region_fraction = parse_env_f32(
            lookup("BARCODE_MAX_REGION_FRACTION"),
            self.max_region_fraction,
        );
        self
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("elongation_threshold", self.elongation_threshold),
            ("proximity_multiplier", self.proximity_multiplier),
            ("merge_divisor", self.merge_divisor),
            ("max_region_fraction", self.max_region_fraction),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LocateError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if self.max_region_fraction > 1.0 {
            return Err(LocateError::InvalidConfig(format!(
                "max_region_fraction must not exceed 1, got {}",
                self.max_region_fraction
            )));
        }
        Ok(())
    }
}

/// Read a JSON config file; keys that are absent keep their defaults
pub fn load_config(path: &Path) -> Result<LocatorConfig> {
    let data = fs::read_to_string(path)?;
    let config: LocatorConfig = serde_json::from_str(&data)?;
    config.validate()?;
    Ok(config)
}
