//! Dungeon Configuration and Builder
//!
//! This module provides configuration types for deterministic dungeon layout generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, Result};

/// Dungeon size presets
///
/// Each preset fixes the board dimensions and the number of rooms sampled.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DungeonSize {
    /// 150×50 board with 25 rooms (default)
    Standard,
    /// 700×200 board with 500 rooms, for stress testing
    Stress,
    /// Custom board and room count
    Custom {
        /// Board width in cells
        width: u32,
        /// Board height in cells
        height: u32,
        /// Number of rooms to sample
        room_count: usize,
    },
}

impl DungeonSize {
    /// Board width in cells
    pub fn width(self) -> u32 {
        match self {
            DungeonSize::Standard => 150,
            DungeonSize::Stress => 700,
            DungeonSize::Custom { width, .. } => width,
        }
    }

    /// Board height in cells
    pub fn height(self) -> u32 {
        match self {
            DungeonSize::Standard => 50,
            DungeonSize::Stress => 200,
            DungeonSize::Custom { height, .. } => height,
        }
    }

    /// Number of rooms sampled before collision merging
    pub fn room_count(self) -> usize {
        match self {
            DungeonSize::Standard => 25,
            DungeonSize::Stress => 500,
            DungeonSize::Custom { room_count, .. } => room_count,
        }
    }

    /// Get a human-readable name for this size
    pub fn name(self) -> &'static str {
        match self {
            DungeonSize::Standard => "Standard",
            DungeonSize::Stress => "Stress",
            DungeonSize::Custom { .. } => "Custom",
        }
    }
}

impl Default for DungeonSize {
    fn default() -> Self {
        DungeonSize::Standard
    }
}

/// Sampling range for one integer room parameter
///
/// A raw value is drawn uniformly from `0..max` and raised to `min` if it
/// falls below. Values under the minimum are not re-rolled, so the minimum is
/// noticeably more likely than any other value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Floor applied after drawing
    pub min: u32,
    /// Exclusive upper bound of the raw draw
    pub max: u32,
}

impl Bounds {
    /// Create a new range
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Smallest value the sampler can produce
    #[inline]
    pub fn smallest(&self) -> u32 {
        self.min
    }

    /// Largest value the sampler can produce
    #[inline]
    pub fn largest(&self) -> u32 {
        self.max.saturating_sub(1).max(self.min)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.max == 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "{} maximum must be > 0",
                name
            )));
        }
        if self.min > self.max {
            return Err(DungeonError::InvalidConfig(format!(
                "{} minimum {} exceeds maximum {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Default half-extent range, shared by both axes
pub const DEFAULT_HALF_EXTENT: Bounds = Bounds::new(3, 10);

/// Configuration for deterministic dungeon layout generation
///
/// The same configuration always produces the identical room set, clusters
/// and triangulation.
///
/// # Example
///
/// ```rust
/// use dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(7)
///     .size(DungeonSize::Standard)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.room_count(), 25);
/// assert_eq!(config.center_x, Bounds::new(11, 139));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DungeonConfig {
    /// Random seed for room sampling
    pub seed: u64,

    /// Board dimensions and room count
    pub size: DungeonSize,

    /// Half extent along x
    pub half_width: Bounds,

    /// Half extent along y
    pub half_length: Bounds,

    /// Room center x coordinate
    pub center_x: Bounds,

    /// Room center y coordinate
    pub center_y: Bounds,
}

impl DungeonConfig {
    /// Get the number of rooms for this configuration
    #[inline]
    pub fn room_count(&self) -> usize {
        self.size.room_count()
    }

    /// Board width in cells
    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width()
    }

    /// Board height in cells
    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// Check every bound before any sampling happens
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the room count or a board dimension is zero,
    /// a range has `min > max` or `max == 0`, or some sampleable room would
    /// not fit on the board.
    pub fn validate(&self) -> Result<()> {
        if self.room_count() == 0 {
            return Err(DungeonError::InvalidConfig(
                "room count must be > 0".to_string(),
            ));
        }
        if self.width() == 0 || self.height() == 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "board must be non-empty (got {}x{})",
                self.width(),
                self.height()
            )));
        }

        self.half_width.validate("half width")?;
        self.half_length.validate("half length")?;
        self.center_x.validate("center x")?;
        self.center_y.validate("center y")?;

        fits("x", self.center_x, self.half_width, self.width())?;
        fits("y", self.center_y, self.half_length, self.height())?;
        Ok(())
    }
}

/// Every room drawn from these ranges must stay on the board.
fn fits(axis: &str, center: Bounds, half: Bounds, extent: u32) -> Result<()> {
    let low = i64::from(center.smallest()) - i64::from(half.largest());
    let high = i64::from(center.largest()) + i64::from(half.largest());
    if low < 0 || high >= i64::from(extent) {
        return Err(DungeonError::InvalidConfig(format!(
            "rooms may span {}..={} on the {} axis, outside board 0..{}",
            low, high, axis, extent
        )));
    }
    Ok(())
}

impl Default for DungeonConfig {
    fn default() -> Self {
        let size = DungeonSize::default();
        let (center_x, center_y) =
            derived_center_bounds(size, DEFAULT_HALF_EXTENT, DEFAULT_HALF_EXTENT);
        Self {
            seed: 0,
            size,
            half_width: DEFAULT_HALF_EXTENT,
            half_length: DEFAULT_HALF_EXTENT,
            center_x,
            center_y,
        }
    }
}

/// Center ranges that keep the largest room one cell clear of the far edge.
///
/// Both minimums use the y extent, matching the reference layouts.
fn derived_center_bounds(
    size: DungeonSize,
    half_width: Bounds,
    half_length: Bounds,
) -> (Bounds, Bounds) {
    let min = half_length.max.saturating_add(1);
    let max_x = size.width().saturating_sub(half_width.max.saturating_add(1));
    let max_y = size.height().saturating_sub(half_length.max.saturating_add(1));
    (Bounds::new(min, max_x), Bounds::new(min, max_y))
}

/// Builder for creating DungeonConfig with validation
///
/// # Example
///
/// ```rust
/// use dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(12345)
///     .size(DungeonSize::Custom { width: 80, height: 40, room_count: 12 })
///     .half_width(2, 6)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.room_count(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct DungeonConfigBuilder {
    seed: Option<u64>,
    size: DungeonSize,
    half_width: Bounds,
    half_length: Bounds,
    center_x: Option<Bounds>,
    center_y: Option<Bounds>,
}

impl DungeonConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - size: Standard (150×50, 25 rooms)
    /// - half extents: `[3, 10)` on both axes
    /// - centers: derived from the board and the half extents
    pub fn new() -> Self {
        Self {
            seed: None,
            size: DungeonSize::default(),
            half_width: DEFAULT_HALF_EXTENT,
            half_length: DEFAULT_HALF_EXTENT,
            center_x: None,
            center_y: None,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the board size preset
    pub fn size(mut self, size: DungeonSize) -> Self {
        self.size = size;
        self
    }

    /// Set the half-width range
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min > max` or `max == 0`
    pub fn half_width(mut self, min: u32, max: u32) -> Result<Self> {
        let bounds = Bounds::new(min, max);
        bounds.validate("half width")?;
        self.half_width = bounds;
        Ok(self)
    }

    /// Set the half-length range
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min > max` or `max == 0`
    pub fn half_length(mut self, min: u32, max: u32) -> Result<Self> {
        let bounds = Bounds::new(min, max);
        bounds.validate("half length")?;
        self.half_length = bounds;
        Ok(self)
    }

    /// Override the center x range
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min > max` or `max == 0`
    pub fn center_x(mut self, min: u32, max: u32) -> Result<Self> {
        let bounds = Bounds::new(min, max);
        bounds.validate("center x")?;
        self.center_x = Some(bounds);
        Ok(self)
    }

    /// Override the center y range
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min > max` or `max == 0`
    pub fn center_y(mut self, min: u32, max: u32) -> Result<Self> {
        let bounds = Bounds::new(min, max);
        bounds.validate("center y")?;
        self.center_y = Some(bounds);
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    /// Center ranges not set explicitly are derived from the board size and
    /// the maximum half extents.
    pub fn build(self) -> Result<DungeonConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let (derived_x, derived_y) =
            derived_center_bounds(self.size, self.half_width, self.half_length);

        let config = DungeonConfig {
            seed,
            size: self.size,
            half_width: self.half_width,
            half_length: self.half_length,
            center_x: self.center_x.unwrap_or(derived_x),
            center_y: self.center_y.unwrap_or(derived_y),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for DungeonConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
