//! Rainbow effect
//!
//! Hue is spread along the layer (one step per LED in speaking order) and
//! rotated by the phase. The base color is ignored.

use core::f32::consts::TAU;

use libm::floorf;

use super::{Effect, EffectParams, SPEED_SCALE};
use crate::color::{Rgb, hsv_to_rgb};

/// Cycle time at speed 0, short enough that speed 1 still moves an LED by
/// more than one color step per 50 ms tick
const CYCLE_TIME_MAX_S: f32 = 30.0;
/// Cycle time at speed 50
const CYCLE_TIME_BASE_S: f32 = 15.0;
/// Cycle time at speed 100
const CYCLE_TIME_MIN_S: f32 = 2.5;

/// Hue step per LED at 100 % spread
const HUE_SPREAD_FACTOR: f32 = 0.1;

/// Hue offset per LED for a spread percentage
pub(crate) fn hue_per_led(spread_percent: f32) -> f32 {
    spread_percent.clamp(0.0, 100.0) / 100.0 * HUE_SPREAD_FACTOR
}

/// Rainbow cycle time in seconds, piecewise linear in speed
pub(crate) fn cycle_time_s(speed: f32) -> f32 {
    let speed = speed.clamp(0.0, 100.0);
    if speed <= SPEED_SCALE {
        CYCLE_TIME_MAX_S - (speed / SPEED_SCALE) * (CYCLE_TIME_MAX_S - CYCLE_TIME_BASE_S)
    } else {
        CYCLE_TIME_BASE_S
            - ((speed - SPEED_SCALE) / SPEED_SCALE) * (CYCLE_TIME_BASE_S - CYCLE_TIME_MIN_S)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RainbowEffect;

impl Effect for RainbowEffect {
    fn period_ms(&self, speed: f32) -> f32 {
        cycle_time_s(speed) * 1000.0
    }

    #[allow(clippy::cast_lossless)]
    fn apply(&self, phase: f32, position: u16, _base: Rgb, params: &EffectParams) -> Rgb {
        let hue = position as f32 * params.hue_per_led + phase / TAU;
        hsv_to_rgb(hue - floorf(hue), 1.0, params.brightness)
    }
}
