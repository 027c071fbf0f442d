//! Setup-time configuration
//!
//! Everything here is validated once, when the renderer is built. Runtime
//! changes go through the control surface instead.

use embassy_time::Duration;

use crate::control::{NumberBounds, NumberKind};
use crate::error::ConfigError;
use crate::layer::LightLayer;
use crate::layout::LedLayout;
use crate::settings::Settings;
use crate::word_mask::MinutePrecision;

/// Default tick interval (20 ticks per second)
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Output brightness window a layer's 0-255 brightness is mapped into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessRange {
    min: f32,
    max: f32,
}

impl BrightnessRange {
    /// Full 0.0-1.0 scale
    pub const FULL: Self = Self { min: 0.0, max: 1.0 };

    /// Word layers never go fully dark while on, nor blinding
    pub const WORDS: Self = Self {
        min: 0.15,
        max: 0.75,
    };

    /// Background is kept dim so words stay readable
    pub const BACKGROUND: Self = Self {
        min: 0.15,
        max: 0.30,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn min(&self) -> f32 {
        self.min
    }

    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Map a unit brightness into this range
    pub fn map(&self, level: f32) -> f32 {
        self.min + level.clamp(0.0, 1.0) * (self.max - self.min)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(self.min) || !in_unit(self.max) || self.min > self.max {
            return Err(ConfigError::InvalidBrightnessRange);
        }
        Ok(())
    }
}

impl Default for BrightnessRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Configuration for the word clock renderer
#[derive(Debug, Clone)]
pub struct WordClockConfig {
    /// Strip length and dark positions
    pub layout: LedLayout,
    /// Time between ticks, used to advance fades and effects
    pub tick_interval: Duration,
    /// Rounded or exact minute phrases
    pub precision: MinutePrecision,
    /// Output brightness window per layer, indexed by [`LightLayer::index`]
    pub brightness_ranges: [BrightnessRange; LightLayer::COUNT],
    /// Accepted range per number control, indexed by [`NumberKind::index`]
    pub number_bounds: [NumberBounds; NumberKind::COUNT],
    /// Settings used at startup and restored by factory reset
    pub defaults: Settings,
}

impl WordClockConfig {
    /// Check the configuration against a frame buffer size
    pub fn validate(&self, max_leds: usize) -> Result<(), ConfigError> {
        self.layout.validate(max_leds)?;
        if self.tick_interval.as_millis() == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        for range in &self.brightness_ranges {
            range.validate()?;
        }
        for bounds in &self.number_bounds {
            bounds.validate()?;
        }
        Ok(())
    }

    pub const fn brightness_range(&self, layer: LightLayer) -> BrightnessRange {
        self.brightness_ranges[layer.index()]
    }

    pub const fn number_bounds(&self, kind: NumberKind) -> NumberBounds {
        self.number_bounds[kind.index()]
    }
}

impl Default for WordClockConfig {
    fn default() -> Self {
        Self {
            layout: LedLayout::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            precision: MinutePrecision::default(),
            brightness_ranges: [
                BrightnessRange::WORDS,
                BrightnessRange::WORDS,
                BrightnessRange::WORDS,
                BrightnessRange::BACKGROUND,
                BrightnessRange::WORDS,
            ],
            number_bounds: NumberKind::ALL.map(NumberKind::default_bounds),
            defaults: Settings::default(),
        }
    }
}
