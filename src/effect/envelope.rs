//! Sine envelope effects: pulse and breathe
//!
//! Both scale the base color by `min + range * (sin(phase) + 1) / 2`.
//! Effect brightness 50 % leaves the envelope untouched; 100 % doubles it
//! up to full scale.

use libm::sinf;

use super::{Effect, EffectParams, scaled_period};
use crate::color::{Rgb, scale_color};

/// Sine brightness envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeEffect {
    /// Period at speed 50
    base_period_ms: f32,
    /// Lowest envelope value
    min: f32,
    /// Envelope swing above `min`
    range: f32,
}

impl EnvelopeEffect {
    /// Quick, shallow pulse
    pub const PULSE: Self = Self {
        base_period_ms: 1000.0,
        min: 0.3,
        range: 0.7,
    };

    /// Slow, deep breathing
    pub const BREATHE: Self = Self {
        base_period_ms: 4000.0,
        min: 0.1,
        range: 0.9,
    };

    /// Envelope intensity for a phase and effect brightness
    pub fn intensity(&self, phase: f32, brightness: f32) -> f32 {
        let wave = (sinf(phase) + 1.0) / 2.0;
        ((self.min + wave * self.range) * brightness * 2.0).clamp(0.0, 1.0)
    }
}

impl Effect for EnvelopeEffect {
    fn period_ms(&self, speed: f32) -> f32 {
        scaled_period(self.base_period_ms, speed)
    }

    fn apply(&self, phase: f32, _position: u16, base: Rgb, params: &EffectParams) -> Rgb {
        scale_color(base, self.intensity(phase, params.brightness))
    }
}
