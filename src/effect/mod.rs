//! Per-layer color effects
//!
//! Effects are pure functions of `(phase, position, base color, params)`.
//! The only state is the phase held in [`EffectState`], one per layer.
//! All effects are dispatched through [`EffectKind`] to avoid trait objects.

mod color_cycle;
mod envelope;
mod rainbow;

use core::f32::consts::TAU;

use embassy_time::Duration;
use libm::fmodf;

pub use color_cycle::ColorCycleEffect;
pub use envelope::EnvelopeEffect;
pub use rainbow::RainbowEffect;

use crate::color::Rgb;

const EFFECT_NAME_NONE: &str = "None";
const EFFECT_NAME_RAINBOW: &str = "Rainbow";
const EFFECT_NAME_PULSE: &str = "Pulse";
const EFFECT_NAME_BREATHE: &str = "Breathe";
const EFFECT_NAME_COLOR_CYCLE: &str = "Color cycle";

const EFFECT_ID_NONE: u8 = 0;
const EFFECT_ID_RAINBOW: u8 = 1;
const EFFECT_ID_PULSE: u8 = 2;
const EFFECT_ID_BREATHE: u8 = 3;
const EFFECT_ID_COLOR_CYCLE: u8 = 4;

/// Speed value the period formulas are normalized by
pub(crate) const SPEED_SCALE: f32 = 50.0;

/// Parameters shared by every effect on a layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    /// Effect brightness, 0.0-1.0
    pub brightness: f32,
    /// Hue offset per LED position, in fractions of the color wheel
    pub hue_per_led: f32,
}

impl EffectParams {
    /// Build params from the user-facing percentages
    pub fn from_percent(brightness: f32, rainbow_spread: f32) -> Self {
        Self {
            brightness: (brightness / 100.0).clamp(0.0, 1.0),
            hue_per_led: rainbow::hue_per_led(rainbow_spread),
        }
    }
}

pub trait Effect {
    /// Time for one full phase revolution at the given speed (0-100)
    fn period_ms(&self, speed: f32) -> f32;

    /// Color of the LED at `position` within its layer
    fn apply(&self, phase: f32, position: u16, base: Rgb, params: &EffectParams) -> Rgb;
}

/// Known effect kinds that can be selected per layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum EffectKind {
    #[default]
    None = EFFECT_ID_NONE,
    Rainbow = EFFECT_ID_RAINBOW,
    Pulse = EFFECT_ID_PULSE,
    Breathe = EFFECT_ID_BREATHE,
    ColorCycle = EFFECT_ID_COLOR_CYCLE,
}

impl EffectKind {
    /// Select option names, in index order
    pub const OPTIONS: [&'static str; 5] = [
        EFFECT_NAME_NONE,
        EFFECT_NAME_RAINBOW,
        EFFECT_NAME_PULSE,
        EFFECT_NAME_BREATHE,
        EFFECT_NAME_COLOR_CYCLE,
    ];

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_NONE => Self::None,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_PULSE => Self::Pulse,
            EFFECT_ID_BREATHE => Self::Breathe,
            EFFECT_ID_COLOR_CYCLE => Self::ColorCycle,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => EFFECT_NAME_NONE,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::Pulse => EFFECT_NAME_PULSE,
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::ColorCycle => EFFECT_NAME_COLOR_CYCLE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_NONE => Some(Self::None),
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            EFFECT_NAME_PULSE => Some(Self::Pulse),
            EFFECT_NAME_BREATHE => Some(Self::Breathe),
            EFFECT_NAME_COLOR_CYCLE => Some(Self::ColorCycle),
            _ => None,
        }
    }

    /// Period of one phase revolution, `None` for static colors
    pub fn period_ms(self, speed: f32) -> Option<f32> {
        match self {
            Self::None => None,
            Self::Rainbow => Some(RainbowEffect.period_ms(speed)),
            Self::Pulse => Some(EnvelopeEffect::PULSE.period_ms(speed)),
            Self::Breathe => Some(EnvelopeEffect::BREATHE.period_ms(speed)),
            Self::ColorCycle => Some(ColorCycleEffect.period_ms(speed)),
        }
    }

    /// Render one LED
    pub fn apply(self, phase: f32, position: u16, base: Rgb, params: &EffectParams) -> Rgb {
        match self {
            Self::None => base,
            Self::Rainbow => RainbowEffect.apply(phase, position, base, params),
            Self::Pulse => EnvelopeEffect::PULSE.apply(phase, position, base, params),
            Self::Breathe => EnvelopeEffect::BREATHE.apply(phase, position, base, params),
            Self::ColorCycle => ColorCycleEffect.apply(phase, position, base, params),
        }
    }
}

/// Period scaling shared by pulse, breathe and color cycle.
///
/// `2.2 * base` at speed 0, `1.2 * base` at 50 and `0.2 * base` at 100.
pub(crate) fn scaled_period(base_ms: f32, speed: f32) -> f32 {
    base_ms * (100.0 - speed.clamp(0.0, 100.0) + 10.0) / SPEED_SCALE
}

/// Phase of one layer's effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectState {
    kind: EffectKind,
    phase: f32,
    speed: f32,
}

impl EffectState {
    pub const fn new(kind: EffectKind, speed: f32) -> Self {
        Self {
            kind,
            phase: 0.0,
            speed,
        }
    }

    pub const fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Current phase in radians, always within `0.0..TAU`
    pub const fn phase(&self) -> f32 {
        self.phase
    }

    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Switch effect. The phase restarts only if the kind actually changes.
    pub fn set_kind(&mut self, kind: EffectKind) {
        if self.kind != kind {
            self.kind = kind;
            self.phase = 0.0;
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(0.0, 100.0);
    }

    /// Advance the phase by one tick
    #[allow(clippy::cast_precision_loss)]
    pub fn advance(&mut self, tick: Duration) {
        let Some(period) = self.kind.period_ms(self.speed) else {
            return;
        };
        if period <= 0.0 {
            return;
        }
        let delta = TAU * tick.as_millis() as f32 / period;
        self.phase = fmodf(self.phase + delta, TAU);
    }

    /// Color the LED at `position` of this layer
    pub fn apply(&self, position: u16, base: Rgb, params: &EffectParams) -> Rgb {
        self.kind.apply(self.phase, position, base, params)
    }
}

impl Default for EffectState {
    fn default() -> Self {
        Self::new(EffectKind::None, 0.0)
    }
}
