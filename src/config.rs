//! Ribbon configuration: dimensions, grid resolution, bundled presets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised while validating a ribbon configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Non-positive dimensions or segment counts. Fatal at construction:
    /// no bone or point may be built from a config that fails validation.
    InvalidConfiguration(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidConfiguration(msg) => {
                write!(f, "invalid ribbon configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Ribbon mesh parameters, fixed at construction.
///
/// Changing any of these requires rebuilding the chain from scratch;
/// there is no runtime reconfiguration of topology.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RibbonConfig {
    /// Lateral extent of the ribbon (world units)
    pub width: f32,
    /// Length of the ribbon along the chain (world units)
    pub height: f32,
    /// Lateral resolution (points per bone = width_segments + 1)
    pub width_segments: u32,
    /// Longitudinal resolution (bones = height_segments + 1)
    pub height_segments: u32,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 30.0,
            width_segments: 10,
            height_segments: 200,
        }
    }
}

impl RibbonConfig {
    /// Parse from a JSON string (camelCase keys, as authored by JS hosts)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check dimensions and resolution before any geometry is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "dimensions must be positive, got width={} height={}",
                self.width, self.height
            )));
        }
        if self.width_segments < 1 || self.height_segments < 1 {
            return Err(ConfigError::InvalidConfiguration(format!(
                "segment counts must be at least 1, got widthSegments={} heightSegments={}",
                self.width_segments, self.height_segments
            )));
        }
        Ok(())
    }

    /// Points per grid row (one bone's ring)
    #[inline]
    pub fn columns(&self) -> usize {
        self.width_segments as usize + 1
    }

    /// Grid rows (one bone each)
    #[inline]
    pub fn rows(&self) -> usize {
        self.height_segments as usize + 1
    }

    /// Total vertex count of the grid
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Fixed distance each bone keeps from its predecessor
    #[inline]
    pub fn segment_length(&self) -> f32 {
        self.height / self.height_segments as f32
    }

    /// Bundled presets, embedded at compile time. The build script
    /// validates every preset file, so parsing cannot fail for a shipped
    /// build; an unknown name returns None.
    pub fn preset(name: &str) -> Option<Self> {
        let json = match name {
            "default" => include_str!("assets/presets/default.json"),
            "dense" => include_str!("assets/presets/dense.json"),
            "wide" => include_str!("assets/presets/wide.json"),
            _ => return None,
        };
        Self::from_json(json).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_demo_params() {
        let config = RibbonConfig::default();
        assert_eq!(config.width, 3.0);
        assert_eq!(config.height, 30.0);
        assert_eq!(config.width_segments, 10);
        assert_eq!(config.height_segments, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_camel_case() {
        let json = r#"{
            "width": 3.0,
            "height": 30.0,
            "widthSegments": 5,
            "heightSegments": 100
        }"#;

        let config = RibbonConfig::from_json(json).unwrap();
        assert_eq!(config.width_segments, 5);
        assert_eq!(config.height_segments, 100);
        assert_eq!(config.vertex_count(), 606);
        assert!((config.segment_length() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = RibbonConfig::from_json(r#"{ "width": 1.5 }"#).unwrap();
        assert_eq!(config.width, 1.5);
        assert_eq!(config.height_segments, 200);
    }

    #[test]
    fn test_zero_segments_rejected() {
        let config = RibbonConfig {
            width_segments: 0,
            ..RibbonConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfiguration(_))
        ));

        let config = RibbonConfig {
            height_segments: 0,
            ..RibbonConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bundled_presets_are_valid() {
        for name in ["default", "dense", "wide"] {
            let config = RibbonConfig::preset(name)
                .unwrap_or_else(|| panic!("preset {} failed to parse", name));
            assert!(config.validate().is_ok(), "preset {} is invalid", name);
        }
        assert!(RibbonConfig::preset("nonexistent").is_none());
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        for (w, h) in [(0.0, 30.0), (-3.0, 30.0), (3.0, 0.0), (3.0, -1.0), (f32::NAN, 30.0)] {
            let config = RibbonConfig {
                width: w,
                height: h,
                ..RibbonConfig::default()
            };
            assert!(
                config.validate().is_err(),
                "width={} height={} should be rejected",
                w,
                h
            );
        }
    }
}
