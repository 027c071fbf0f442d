//! Control surface
//!
//! The host exposes switches, numbers, selects, lights and a reset button to
//! the user. Each is one [`Control`] variant; values travel as a
//! [`ControlValue`] and are validated into a
//! [`ControlIntent`](crate::intent::ControlIntent) before they reach the
//! renderer.

use crate::error::{ConfigError, ControlError};
use crate::intent::ControlIntent;
use crate::intent_processor::ControlSender;
use crate::layer::LightLayer;
use crate::settings::LayerLight;

const NUMBER_ID_WORDS_FADE_IN: u8 = 0;
const NUMBER_ID_WORDS_FADE_OUT: u8 = 1;
const NUMBER_ID_SECONDS_FADE_OUT: u8 = 2;
const NUMBER_ID_TYPING_DELAY: u8 = 3;
const NUMBER_ID_RAINBOW_SPREAD: u8 = 4;
const NUMBER_ID_WORDS_EFFECT_BRIGHTNESS: u8 = 5;
const NUMBER_ID_EFFECT_SPEED: u8 = 6;
const NUMBER_ID_SECONDS_EFFECT_BRIGHTNESS: u8 = 7;

const NUMBER_NAME_WORDS_FADE_IN: &str = "words_fade_in";
const NUMBER_NAME_WORDS_FADE_OUT: &str = "words_fade_out";
const NUMBER_NAME_SECONDS_FADE_OUT: &str = "seconds_fade_out";
const NUMBER_NAME_TYPING_DELAY: &str = "typing_delay";
const NUMBER_NAME_RAINBOW_SPREAD: &str = "rainbow_spread";
const NUMBER_NAME_WORDS_EFFECT_BRIGHTNESS: &str = "words_effect_brightness";
const NUMBER_NAME_EFFECT_SPEED: &str = "effect_speed";
const NUMBER_NAME_SECONDS_EFFECT_BRIGHTNESS: &str = "seconds_effect_brightness";

/// Numeric controls. Durations are in seconds, the rest in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NumberKind {
    WordsFadeIn = NUMBER_ID_WORDS_FADE_IN,
    WordsFadeOut = NUMBER_ID_WORDS_FADE_OUT,
    SecondsFadeOut = NUMBER_ID_SECONDS_FADE_OUT,
    TypingDelay = NUMBER_ID_TYPING_DELAY,
    RainbowSpread = NUMBER_ID_RAINBOW_SPREAD,
    WordsEffectBrightness = NUMBER_ID_WORDS_EFFECT_BRIGHTNESS,
    EffectSpeed = NUMBER_ID_EFFECT_SPEED,
    SecondsEffectBrightness = NUMBER_ID_SECONDS_EFFECT_BRIGHTNESS,
}

impl NumberKind {
    pub const COUNT: usize = 8;

    pub const ALL: [Self; Self::COUNT] = [
        Self::WordsFadeIn,
        Self::WordsFadeOut,
        Self::SecondsFadeOut,
        Self::TypingDelay,
        Self::RainbowSpread,
        Self::WordsEffectBrightness,
        Self::EffectSpeed,
        Self::SecondsEffectBrightness,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            NUMBER_ID_WORDS_FADE_IN => Self::WordsFadeIn,
            NUMBER_ID_WORDS_FADE_OUT => Self::WordsFadeOut,
            NUMBER_ID_SECONDS_FADE_OUT => Self::SecondsFadeOut,
            NUMBER_ID_TYPING_DELAY => Self::TypingDelay,
            NUMBER_ID_RAINBOW_SPREAD => Self::RainbowSpread,
            NUMBER_ID_WORDS_EFFECT_BRIGHTNESS => Self::WordsEffectBrightness,
            NUMBER_ID_EFFECT_SPEED => Self::EffectSpeed,
            NUMBER_ID_SECONDS_EFFECT_BRIGHTNESS => Self::SecondsEffectBrightness,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WordsFadeIn => NUMBER_NAME_WORDS_FADE_IN,
            Self::WordsFadeOut => NUMBER_NAME_WORDS_FADE_OUT,
            Self::SecondsFadeOut => NUMBER_NAME_SECONDS_FADE_OUT,
            Self::TypingDelay => NUMBER_NAME_TYPING_DELAY,
            Self::RainbowSpread => NUMBER_NAME_RAINBOW_SPREAD,
            Self::WordsEffectBrightness => NUMBER_NAME_WORDS_EFFECT_BRIGHTNESS,
            Self::EffectSpeed => NUMBER_NAME_EFFECT_SPEED,
            Self::SecondsEffectBrightness => NUMBER_NAME_SECONDS_EFFECT_BRIGHTNESS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Value is a duration in seconds
    pub const fn is_duration(self) -> bool {
        matches!(
            self,
            Self::WordsFadeIn | Self::WordsFadeOut | Self::SecondsFadeOut | Self::TypingDelay
        )
    }

    /// Bounds used when the host does not configure any
    pub const fn default_bounds(self) -> NumberBounds {
        match self {
            Self::WordsFadeIn | Self::WordsFadeOut => NumberBounds::new(0.0, 10.0, 0.1),
            Self::SecondsFadeOut => NumberBounds::new(0.0, 300.0, 1.0),
            Self::TypingDelay => NumberBounds::new(0.0, 1.0, 0.01),
            Self::RainbowSpread
            | Self::WordsEffectBrightness
            | Self::EffectSpeed
            | Self::SecondsEffectBrightness => NumberBounds::new(0.0, 100.0, 1.0),
        }
    }
}

/// Accepted range of a number control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberBounds {
    pub min: f32,
    pub max: f32,
    /// UI step, reported to the host
    pub step: f32,
}

impl NumberBounds {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Accept a value within bounds
    pub fn check(&self, value: f32) -> Result<f32, ControlError> {
        if value.is_nan() || value < self.min || value > self.max {
            return Err(ControlError::OutOfRange);
        }
        Ok(value)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.min.is_nan() || self.max.is_nan() || self.min > self.max || self.step <= 0.0 {
            return Err(ConfigError::InvalidNumberBounds);
        }
        Ok(())
    }
}

/// Select controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectKind {
    SecondsMode,
    /// Effect of one layer
    Effect(LightLayer),
    Language,
}

impl SelectKind {
    /// Option names the host should offer
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::SecondsMode => &crate::word_mask::SecondsMode::OPTIONS,
            Self::Effect(_) => &crate::effect::EffectKind::OPTIONS,
            Self::Language => &crate::language::Language::OPTIONS,
        }
    }
}

/// One user-facing control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Master on/off switch
    Power,
    /// RGB light of one layer
    Light(LightLayer),
    Number(NumberKind),
    Select(SelectKind),
    /// Factory reset button
    FactoryReset,
}

/// Value written to or read from a control
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlValue<'a> {
    Switch(bool),
    Light(LayerLight),
    Number(f32),
    Select(&'a str),
    /// Button press, also reported by buttons on read
    Press,
}

/// Capability the host drives controls through
pub trait ControlSurface {
    /// Validate and queue a write. Rejected writes leave state untouched.
    fn set_value(&mut self, control: Control, value: ControlValue<'_>)
    -> Result<(), ControlError>;

    /// Current value for display
    fn get_value(&self, control: Control) -> ControlValue<'static>;
}

/// Fire-and-forget control writes from another execution context.
///
/// Values are validated here and consumed by the renderer at its next tick.
#[derive(Clone, Copy)]
pub struct ControlHandle<'a, const SIZE: usize> {
    sender: ControlSender<'a, SIZE>,
    bounds: [NumberBounds; NumberKind::COUNT],
}

impl<'a, const SIZE: usize> ControlHandle<'a, SIZE> {
    pub const fn new(
        sender: ControlSender<'a, SIZE>,
        bounds: [NumberBounds; NumberKind::COUNT],
    ) -> Self {
        Self { sender, bounds }
    }

    /// Validate and send a control write
    pub fn set_value(&self, control: Control, value: ControlValue<'_>) -> Result<(), ControlError> {
        let intent = ControlIntent::parse(control, value, &self.bounds)?;
        self.send(intent)
    }

    /// Send an already built intent
    pub fn send(&self, intent: ControlIntent) -> Result<(), ControlError> {
        self.sender
            .try_send(intent)
            .map_err(|_| ControlError::QueueFull)
    }
}
