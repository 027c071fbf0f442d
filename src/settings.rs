//! User settings and their persisted form
//!
//! [`Settings`] is the complete block of values a user can change at runtime.
//! It is stored as an opaque key/value set: every [`SettingKey`] maps to one
//! `u32` word, so any flash or NVS backend can hold it.

use embassy_time::Duration;

use crate::color::{Rgb, rgb_from_u32, scale_color};
use crate::config::BrightnessRange;
use crate::effect::{EffectKind, EffectParams};
use crate::error::StoreError;
use crate::language::Language;
use crate::layer::LightLayer;
use crate::word_mask::SecondsMode;

/// On/off, color and brightness of one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerLight {
    pub on: bool,
    pub color: Rgb,
    pub brightness: u8,
}

impl LayerLight {
    pub const fn new(on: bool, color: Rgb, brightness: u8) -> Self {
        Self {
            on,
            color,
            brightness,
        }
    }

    /// Base color after mapping brightness into the layer's output window.
    ///
    /// Returns black when the light is off.
    pub fn scaled(&self, range: BrightnessRange) -> Rgb {
        if !self.on {
            return Rgb::default();
        }
        scale_color(self.color, range.map(f32::from(self.brightness) / 255.0))
    }
}

/// Fade durations of one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerTimings {
    pub fade_in: Duration,
    pub fade_out: Duration,
}

impl LayerTimings {
    pub const fn new(fade_in: Duration, fade_out: Duration) -> Self {
        Self { fade_in, fade_out }
    }

    pub const INSTANT: Self = Self::new(Duration::from_millis(0), Duration::from_millis(0));
}

const WORDS_TIMINGS: LayerTimings =
    LayerTimings::new(Duration::from_millis(300), Duration::from_millis(1000));
const SECONDS_TIMINGS: LayerTimings =
    LayerTimings::new(Duration::from_millis(0), Duration::from_millis(90_000));

const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(130);
const DEFAULT_RAINBOW_SPREAD: f32 = 15.0;
const DEFAULT_EFFECT_SPEED: f32 = 10.0;
const DEFAULT_EFFECT_BRIGHTNESS: f32 = 50.0;

#[allow(clippy::unreadable_literal)]
const DEFAULT_LIGHTS: [LayerLight; LightLayer::COUNT] = [
    LayerLight::new(true, rgb_from_u32(0x008080), 128),
    LayerLight::new(true, rgb_from_u32(0xFF8000), 128),
    LayerLight::new(true, rgb_from_u32(0x8000FF), 128),
    LayerLight::new(false, rgb_from_u32(0x1A1A1A), 26),
    LayerLight::new(true, rgb_from_u32(0xFFFFFF), 128),
];

/// Runtime-adjustable state of the clock
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub power: bool,
    pub seconds_mode: SecondsMode,
    pub language: Language,
    /// Stagger between successive newly lit word LEDs
    pub typing_delay: Duration,
    /// Rainbow hue spread, percent
    pub rainbow_spread: f32,
    /// Shared effect speed, 0-100
    pub effect_speed: f32,
    pub lights: [LayerLight; LightLayer::COUNT],
    pub timings: [LayerTimings; LightLayer::COUNT],
    pub effects: [EffectKind; LightLayer::COUNT],
    /// Effect brightness per layer, percent
    pub effect_brightness: [f32; LightLayer::COUNT],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            power: true,
            seconds_mode: SecondsMode::Current,
            language: Language::French,
            typing_delay: DEFAULT_TYPING_DELAY,
            rainbow_spread: DEFAULT_RAINBOW_SPREAD,
            effect_speed: DEFAULT_EFFECT_SPEED,
            lights: DEFAULT_LIGHTS,
            timings: [
                WORDS_TIMINGS,
                WORDS_TIMINGS,
                SECONDS_TIMINGS,
                LayerTimings::INSTANT,
                WORDS_TIMINGS,
            ],
            effects: [
                EffectKind::None,
                EffectKind::None,
                EffectKind::Rainbow,
                EffectKind::None,
                EffectKind::Rainbow,
            ],
            effect_brightness: [DEFAULT_EFFECT_BRIGHTNESS; LightLayer::COUNT],
        }
    }
}

impl Settings {
    pub const fn light(&self, layer: LightLayer) -> LayerLight {
        self.lights[layer.index()]
    }

    pub const fn timings(&self, layer: LightLayer) -> LayerTimings {
        self.timings[layer.index()]
    }

    pub const fn effect(&self, layer: LightLayer) -> EffectKind {
        self.effects[layer.index()]
    }

    /// Effect parameters for one layer
    pub fn effect_params(&self, layer: LightLayer) -> EffectParams {
        EffectParams::from_percent(self.effect_brightness[layer.index()], self.rainbow_spread)
    }

    /// Persist every key
    pub fn save_to<S: SettingsStore>(&self, store: &mut S) -> Result<(), StoreError> {
        for key in SettingKey::iter() {
            store.save(key, self.encode(key))?;
        }
        Ok(())
    }

    /// Build settings from a store, falling back to `defaults` for missing or
    /// invalid entries.
    pub fn load_from<S: SettingsStore>(store: &S, defaults: &Self) -> Self {
        let mut settings = defaults.clone();
        for key in SettingKey::iter() {
            if let Some(raw) = store.load(key) {
                settings.decode(key, raw);
            }
        }
        settings
    }

    /// Encode one setting as an opaque word
    pub fn encode(&self, key: SettingKey) -> u32 {
        match key {
            SettingKey::Power => u32::from(self.power),
            SettingKey::SecondsMode => self.seconds_mode as u32,
            SettingKey::Language => self.language as u32,
            SettingKey::TypingDelay => duration_to_raw(self.typing_delay),
            SettingKey::RainbowSpread => self.rainbow_spread.to_bits(),
            SettingKey::EffectSpeed => self.effect_speed.to_bits(),
            SettingKey::Light(layer) => {
                let light = self.light(layer);
                (u32::from(light.on) << 24)
                    | (u32::from(light.color.r) << 16)
                    | (u32::from(light.color.g) << 8)
                    | u32::from(light.color.b)
            }
            SettingKey::LightBrightness(layer) => u32::from(self.light(layer).brightness),
            SettingKey::FadeIn(layer) => duration_to_raw(self.timings(layer).fade_in),
            SettingKey::FadeOut(layer) => duration_to_raw(self.timings(layer).fade_out),
            SettingKey::Effect(layer) => self.effect(layer) as u32,
            SettingKey::EffectBrightness(layer) => {
                self.effect_brightness[layer.index()].to_bits()
            }
        }
    }

    /// Decode one setting. Returns false and keeps the current value if the
    /// word is not a valid encoding.
    pub fn decode(&mut self, key: SettingKey, raw: u32) -> bool {
        match key {
            SettingKey::Power => match raw {
                0 => self.power = false,
                1 => self.power = true,
                _ => return false,
            },
            SettingKey::SecondsMode => {
                let Some(mode) = u8::try_from(raw).ok().and_then(SecondsMode::from_raw) else {
                    return false;
                };
                self.seconds_mode = mode;
            }
            SettingKey::Language => {
                let Some(language) = u8::try_from(raw).ok().and_then(Language::from_raw) else {
                    return false;
                };
                self.language = language;
            }
            SettingKey::TypingDelay => self.typing_delay = duration_from_raw(raw),
            SettingKey::RainbowSpread => {
                let Some(value) = percent_from_raw(raw) else {
                    return false;
                };
                self.rainbow_spread = value;
            }
            SettingKey::EffectSpeed => {
                let Some(value) = percent_from_raw(raw) else {
                    return false;
                };
                self.effect_speed = value;
            }
            SettingKey::Light(layer) => {
                if raw >> 25 != 0 {
                    return false;
                }
                let light = &mut self.lights[layer.index()];
                light.on = raw >> 24 == 1;
                light.color = rgb_from_u32(raw & 0x00FF_FFFF);
            }
            SettingKey::LightBrightness(layer) => {
                let Ok(brightness) = u8::try_from(raw) else {
                    return false;
                };
                self.lights[layer.index()].brightness = brightness;
            }
            SettingKey::FadeIn(layer) => {
                self.timings[layer.index()].fade_in = duration_from_raw(raw);
            }
            SettingKey::FadeOut(layer) => {
                self.timings[layer.index()].fade_out = duration_from_raw(raw);
            }
            SettingKey::Effect(layer) => {
                let Some(kind) = u8::try_from(raw).ok().and_then(EffectKind::from_raw) else {
                    return false;
                };
                self.effects[layer.index()] = kind;
            }
            SettingKey::EffectBrightness(layer) => {
                let Some(value) = percent_from_raw(raw) else {
                    return false;
                };
                self.effect_brightness[layer.index()] = value;
            }
        }
        true
    }
}

#[allow(clippy::cast_possible_truncation)]
fn duration_to_raw(duration: Duration) -> u32 {
    duration.as_millis().min(u64::from(u32::MAX)) as u32
}

fn duration_from_raw(raw: u32) -> Duration {
    Duration::from_millis(u64::from(raw))
}

fn percent_from_raw(raw: u32) -> Option<f32> {
    let value = f32::from_bits(raw);
    (0.0..=100.0).contains(&value).then_some(value)
}

const SETTING_ID_POWER: u16 = 0;
const SETTING_ID_SECONDS_MODE: u16 = 1;
const SETTING_ID_LANGUAGE: u16 = 2;
const SETTING_ID_TYPING_DELAY: u16 = 3;
const SETTING_ID_RAINBOW_SPREAD: u16 = 4;
const SETTING_ID_EFFECT_SPEED: u16 = 5;

// Per-layer keys: base + layer index
const SETTING_BASE_LIGHT: u16 = 0x10;
const SETTING_BASE_LIGHT_BRIGHTNESS: u16 = 0x20;
const SETTING_BASE_FADE_IN: u16 = 0x30;
const SETTING_BASE_FADE_OUT: u16 = 0x40;
const SETTING_BASE_EFFECT: u16 = 0x50;
const SETTING_BASE_EFFECT_BRIGHTNESS: u16 = 0x60;

/// Key of one persisted setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Power,
    SecondsMode,
    Language,
    TypingDelay,
    RainbowSpread,
    EffectSpeed,
    /// On bit and RGB color
    Light(LightLayer),
    LightBrightness(LightLayer),
    FadeIn(LightLayer),
    FadeOut(LightLayer),
    Effect(LightLayer),
    EffectBrightness(LightLayer),
}

impl SettingKey {
    const GLOBAL: [Self; 6] = [
        Self::Power,
        Self::SecondsMode,
        Self::Language,
        Self::TypingDelay,
        Self::RainbowSpread,
        Self::EffectSpeed,
    ];

    const PER_LAYER: [fn(LightLayer) -> Self; 6] = [
        Self::Light,
        Self::LightBrightness,
        Self::FadeIn,
        Self::FadeOut,
        Self::Effect,
        Self::EffectBrightness,
    ];

    /// Every key, globals first
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::GLOBAL.into_iter().chain(
            Self::PER_LAYER
                .into_iter()
                .flat_map(|key| LightLayer::ALL.into_iter().map(key)),
        )
    }

    /// Stable numeric id for the storage backend
    pub const fn id(self) -> u16 {
        match self {
            Self::Power => SETTING_ID_POWER,
            Self::SecondsMode => SETTING_ID_SECONDS_MODE,
            Self::Language => SETTING_ID_LANGUAGE,
            Self::TypingDelay => SETTING_ID_TYPING_DELAY,
            Self::RainbowSpread => SETTING_ID_RAINBOW_SPREAD,
            Self::EffectSpeed => SETTING_ID_EFFECT_SPEED,
            Self::Light(layer) => SETTING_BASE_LIGHT + layer as u16,
            Self::LightBrightness(layer) => SETTING_BASE_LIGHT_BRIGHTNESS + layer as u16,
            Self::FadeIn(layer) => SETTING_BASE_FADE_IN + layer as u16,
            Self::FadeOut(layer) => SETTING_BASE_FADE_OUT + layer as u16,
            Self::Effect(layer) => SETTING_BASE_EFFECT + layer as u16,
            Self::EffectBrightness(layer) => SETTING_BASE_EFFECT_BRIGHTNESS + layer as u16,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_id(id: u16) -> Option<Self> {
        match id {
            SETTING_ID_POWER => return Some(Self::Power),
            SETTING_ID_SECONDS_MODE => return Some(Self::SecondsMode),
            SETTING_ID_LANGUAGE => return Some(Self::Language),
            SETTING_ID_TYPING_DELAY => return Some(Self::TypingDelay),
            SETTING_ID_RAINBOW_SPREAD => return Some(Self::RainbowSpread),
            SETTING_ID_EFFECT_SPEED => return Some(Self::EffectSpeed),
            _ => {}
        }
        let Some(layer) = LightLayer::from_raw((id & 0x0F) as u8) else {
            return None;
        };
        Some(match id & 0xFFF0 {
            SETTING_BASE_LIGHT => Self::Light(layer),
            SETTING_BASE_LIGHT_BRIGHTNESS => Self::LightBrightness(layer),
            SETTING_BASE_FADE_IN => Self::FadeIn(layer),
            SETTING_BASE_FADE_OUT => Self::FadeOut(layer),
            SETTING_BASE_EFFECT => Self::Effect(layer),
            SETTING_BASE_EFFECT_BRIGHTNESS => Self::EffectBrightness(layer),
            _ => return None,
        })
    }
}

/// Key/value backend for settings persistence
pub trait SettingsStore {
    /// Stored word for a key, `None` if never saved
    fn load(&self, key: SettingKey) -> Option<u32>;

    fn save(&mut self, key: SettingKey, value: u32) -> Result<(), StoreError>;
}
