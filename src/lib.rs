#![no_std]

pub mod channel;
pub mod clock;
pub mod color;
pub mod config;
pub mod control;
pub mod effect;
pub mod error;
pub mod fade;
pub mod frame_scheduler;
pub mod intent;
pub mod intent_processor;
pub mod language;
pub mod layer;
pub mod layout;
pub mod math8;
pub mod renderer;
pub mod settings;
pub mod word_mask;

pub use clock::{ClockSource, TimeSample};
pub use config::{BrightnessRange, WordClockConfig};
pub use control::{
    Control, ControlHandle, ControlSurface, ControlValue, NumberBounds, NumberKind, SelectKind,
};
pub use effect::{EffectKind, EffectState};
pub use error::{ConfigError, ControlError, StoreError, StripError};
pub use fade::FadeState;
pub use frame_scheduler::{TickResult, TickScheduler};
pub use intent::ControlIntent;
pub use intent_processor::{ControlChannel, ControlReceiver, ControlSender, IntentEffects};
pub use language::Language;
pub use layer::LightLayer;
pub use layout::LedLayout;
pub use renderer::{FrameStats, Renderer, TickStatus};
pub use settings::{LayerLight, LayerTimings, SettingKey, Settings, SettingsStore};
pub use word_mask::{MinutePrecision, SecondsMode, WordMask, word_mask};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver trait
///
/// Implement this trait to support different hardware platforms.
/// The renderer writes every pixel of a frame, then calls `show` once.
pub trait LedStrip {
    /// Stage the color of one LED
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Push the staged frame to the LEDs
    fn show(&mut self) -> Result<(), StripError>;
}
