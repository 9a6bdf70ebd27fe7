//! Overlay Configuration and Builder
//!
//! This module provides the configuration types for the territory overlay.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};
use crate::host::ObjectFilter;
use crate::render::{Palette, RenderOptions, DEFAULT_REGION_SHIFT};

/// Fewest sites the diagram is computed for
///
/// Below this the tessellation is too unstable to be worth drawing.
pub const DEFAULT_MIN_SITES: usize = 6;

/// Configuration for the territory overlay
///
/// # Example
///
/// ```rust
/// use empire_voronoi::*;
///
/// let config = OverlayConfigBuilder::new()
///     .border_width(2.0).unwrap()
///     .fill_regions(false)
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: OverlayConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Stroke the borders between different owners
    pub show_borders: bool,

    /// Fill owned regions
    pub fill_regions: bool,

    /// Border stroke width in canvas pixels
    pub border_width: f64,

    /// Weight pulling region vertices toward their site
    ///
    /// - 0.0: regions fill the whole cell (no gap for the border)
    /// - 0.1: default, every vertex moves 1/11th of the way to the site
    pub region_shift: f64,

    /// Minimum number of sites before the diagram is computed
    pub min_sites: usize,

    /// How often the host should call `refresh`
    pub poll_period: Duration,

    /// Which map objects become sites
    pub filter: ObjectFilter,

    /// Overlay colors
    pub palette: Palette,
}

impl OverlayConfig {
    /// Render options derived from this configuration
    #[inline]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_borders: self.show_borders,
            fill_regions: self.fill_regions,
            border_width: self.border_width,
            region_shift: self.region_shift,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            show_borders: true,
            fill_regions: true,
            border_width: 4.0,
            region_shift: DEFAULT_REGION_SHIFT,
            min_sites: DEFAULT_MIN_SITES,
            poll_period: Duration::from_secs(1),
            filter: ObjectFilter::default(),
            palette: Palette::default(),
        }
    }
}

/// Builder for creating OverlayConfig with validation
///
/// # Example
///
/// ```rust
/// use empire_voronoi::*;
/// use std::time::Duration;
///
/// let config = OverlayConfigBuilder::new()
///     .filter(ObjectFilter::planets_only())
///     .levels(Some(1), Some(5)).unwrap()
///     .poll_period(Duration::from_millis(500)).unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.filter.level_from, Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OverlayConfigBuilder {
    config: OverlayConfig,
}

impl OverlayConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - borders and region fills on
    /// - border_width: 4.0
    /// - region_shift: 0.1
    /// - min_sites: 6
    /// - poll_period: 1 second
    /// - every object kind and level
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_borders(mut self, show: bool) -> Self {
        self.config.show_borders = show;
        self
    }

    pub fn fill_regions(mut self, fill: bool) -> Self {
        self.config.fill_regions = fill;
        self
    }

    /// Set the border stroke width
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the width is not a positive finite number
    pub fn border_width(mut self, width: f64) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(OverlayError::InvalidConfig(format!(
                "border width must be positive (got {})",
                width
            )));
        }
        self.config.border_width = width;
        Ok(self)
    }

    /// Set the region shrink weight
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the weight is negative or not finite
    pub fn region_shift(mut self, shift: f64) -> Result<Self> {
        if !shift.is_finite() || shift < 0.0 {
            return Err(OverlayError::InvalidConfig(format!(
                "region shift must be >= 0 (got {})",
                shift
            )));
        }
        self.config.region_shift = shift;
        Ok(self)
    }

    /// Set the minimum site count
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min_sites` is 0
    pub fn min_sites(mut self, min_sites: usize) -> Result<Self> {
        if min_sites == 0 {
            return Err(OverlayError::InvalidConfig(
                "min_sites must be at least 1".to_string(),
            ));
        }
        self.config.min_sites = min_sites;
        Ok(self)
    }

    /// Set the refresh period
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a zero period
    pub fn poll_period(mut self, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(OverlayError::InvalidConfig(
                "poll period must be non-zero".to_string(),
            ));
        }
        self.config.poll_period = period;
        Ok(self)
    }

    pub fn filter(mut self, filter: ObjectFilter) -> Self {
        self.config.filter = filter;
        self
    }

    /// Restrict sites to an inclusive object level range
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `from > to`
    pub fn levels(mut self, from: Option<u8>, to: Option<u8>) -> Result<Self> {
        self.config.filter.level_from = from;
        self.config.filter.level_to = to;
        self.config.filter.validate()?;
        Ok(self)
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the object filter has an inverted level range
    pub fn build(self) -> Result<OverlayConfig> {
        self.config.filter.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = OverlayConfigBuilder::new().build().unwrap();
        assert_eq!(config, OverlayConfig::default());
        assert_eq!(config.min_sites, 6);
        assert_eq!(config.border_width, 4.0);
        assert_eq!(config.region_shift, 0.1);
        assert_eq!(config.poll_period, Duration::from_secs(1));
        assert!(config.show_borders && config.fill_regions);
    }

    #[test]
    fn test_builder_custom() {
        let config = OverlayConfigBuilder::new()
            .show_borders(false)
            .border_width(1.5)
            .unwrap()
            .region_shift(0.0)
            .unwrap()
            .min_sites(3)
            .unwrap()
            .build()
            .unwrap();

        assert!(!config.show_borders);
        assert_eq!(config.border_width, 1.5);
        assert_eq!(config.region_shift, 0.0);
        assert_eq!(config.min_sites, 3);

        let options = config.render_options();
        assert!(!options.show_borders);
        assert_eq!(options.border_width, 1.5);
    }

    #[test]
    fn test_builder_invalid_values() {
        assert!(OverlayConfigBuilder::new().border_width(0.0).is_err());
        assert!(OverlayConfigBuilder::new().border_width(f64::NAN).is_err());
        assert!(OverlayConfigBuilder::new().region_shift(-0.1).is_err());
        assert!(OverlayConfigBuilder::new().min_sites(0).is_err());
        assert!(OverlayConfigBuilder::new().poll_period(Duration::ZERO).is_err());
        assert!(OverlayConfigBuilder::new().levels(Some(4), Some(2)).is_err());
    }

    #[test]
    fn test_build_rejects_inverted_filter() {
        let filter = ObjectFilter {
            level_from: Some(9),
            level_to: Some(0),
            ..Default::default()
        };
        let result = OverlayConfigBuilder::new().filter(filter).build();
        assert!(matches!(result, Err(OverlayError::InvalidConfig(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = OverlayConfigBuilder::new()
            .filter(ObjectFilter::planets_only())
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: OverlayConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
