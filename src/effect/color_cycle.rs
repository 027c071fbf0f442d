use core::f32::consts::TAU;

use libm::floorf;

use super::{Effect, EffectParams, scaled_period};
use crate::color::{Rgb, hex_palette, scale_color};

const COLOR_CYCLE_BASE_PERIOD_MS: f32 = 10_000.0;

// Hue wheel in sixths
#[allow(clippy::unreadable_literal)]
const COLOR_CYCLE_PALETTE: [Rgb; 6] = hex_palette![
    0xFF0000, // Red
    0xFFFF00, // Yellow
    0x00FF00, // Green
    0x00FFFF, // Cyan
    0x0000FF, // Blue
    0xFF00FF, // Magenta
];

/// Whole layer steps through a fixed palette, one entry per sixth of a period
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorCycleEffect;

impl ColorCycleEffect {
    /// Palette entry shown at a phase
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn color_at(phase: f32) -> Rgb {
        let steps = COLOR_CYCLE_PALETTE.len();
        let step = floorf(phase / TAU * steps as f32) as usize;
        COLOR_CYCLE_PALETTE[step.min(steps - 1)]
    }
}

impl Effect for ColorCycleEffect {
    fn period_ms(&self, speed: f32) -> f32 {
        scaled_period(COLOR_CYCLE_BASE_PERIOD_MS, speed)
    }

    fn apply(&self, phase: f32, _position: u16, _base: Rgb, params: &EffectParams) -> Rgb {
        scale_color(Self::color_at(phase), params.brightness)
    }
}
