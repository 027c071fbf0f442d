//! Intent processing module
//!
//! Applies queued control intents to the settings block at the start of a
//! tick and reports what the renderer has to refresh.

use embassy_time::Duration;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{Channel, Receiver, Sender};
use crate::control::NumberKind;
use crate::error::ControlError;
use crate::intent::ControlIntent;
use crate::layer::LightLayer;
use crate::settings::Settings;

/// Capacity of the in-renderer queue fed by direct setters
pub const PENDING_CAPACITY: usize = 16;

const WORD_LAYERS: [LightLayer; 3] = [LightLayer::Hours, LightLayer::Minutes, LightLayer::Words];

/// Side effects from processing intents that the renderer should apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentEffects {
    /// Settings were restored to defaults
    pub factory_reset: bool,
    /// Face language switched
    pub language_changed: bool,
    /// Word mask must be recomputed
    pub mask_stale: bool,
    /// Any setting changed and should be persisted
    pub changed: bool,
}

/// Type alias for control sender
pub type ControlSender<'a, const SIZE: usize> = Sender<'a, ControlIntent, SIZE>;

/// Type alias for control receiver
pub type ControlReceiver<'a, const SIZE: usize> = Receiver<'a, ControlIntent, SIZE>;

/// Type alias for the control channel
pub type ControlChannel<const SIZE: usize> = Channel<ControlIntent, SIZE>;

/// Queues control intents and applies them to [`Settings`]
pub struct ControlProcessor<'a, const SIZE: usize> {
    intents: ControlReceiver<'a, SIZE>,
    pending: Deque<ControlIntent, PENDING_CAPACITY>,
}

impl<'a, const SIZE: usize> ControlProcessor<'a, SIZE> {
    pub const fn new(intents: ControlReceiver<'a, SIZE>) -> Self {
        Self {
            intents,
            pending: Deque::new(),
        }
    }

    /// Queue an intent from a direct setter
    pub fn enqueue(&mut self, intent: ControlIntent) -> Result<(), ControlError> {
        self.pending
            .push_back(intent)
            .map_err(|_| ControlError::QueueFull)
    }

    /// Drop every queued intent, including those waiting in the channel
    pub fn clear(&mut self) {
        self.pending.clear();
        self.intents.clear();
    }

    /// Apply all pending intents (non-blocking)
    ///
    /// Direct setter intents are applied first, then the channel is drained.
    pub fn process_pending(&mut self, settings: &mut Settings, defaults: &Settings) -> IntentEffects {
        let mut effects = IntentEffects::default();

        while let Some(intent) = self.pending.pop_front() {
            Self::apply(settings, defaults, intent, &mut effects);
        }
        while let Ok(intent) = self.intents.try_receive() {
            Self::apply(settings, defaults, intent, &mut effects);
        }

        effects
    }

    fn apply(
        settings: &mut Settings,
        defaults: &Settings,
        intent: ControlIntent,
        effects: &mut IntentEffects,
    ) {
        let before_language = settings.language;
        match intent {
            ControlIntent::SetPower(on) => settings.power = on,
            ControlIntent::SetLight(layer, light) => settings.lights[layer.index()] = light,
            ControlIntent::SetNumber(kind, value) => Self::apply_number(settings, kind, value),
            ControlIntent::SetFade {
                layer,
                fade_in,
                fade_out,
            } => {
                let timings = &mut settings.timings[layer.index()];
                if let Some(fade_in) = fade_in {
                    timings.fade_in = fade_in;
                }
                if let Some(fade_out) = fade_out {
                    timings.fade_out = fade_out;
                }
            }
            ControlIntent::SetEffect(layer, kind) => settings.effects[layer.index()] = kind,
            ControlIntent::SetSecondsMode(mode) => {
                settings.seconds_mode = mode;
                effects.mask_stale = true;
            }
            ControlIntent::SetLanguage(language) => {
                settings.language = language;
                effects.mask_stale = true;
            }
            ControlIntent::FactoryReset => {
                #[cfg(feature = "esp32-log")]
                println!("[ControlProcessor.apply] factory reset");
                settings.clone_from(defaults);
                effects.factory_reset = true;
                effects.mask_stale = true;
            }
        }
        if settings.language != before_language {
            #[cfg(feature = "esp32-log")]
            println!(
                "[ControlProcessor.apply] language: {}",
                settings.language.code()
            );
            effects.language_changed = true;
        }
        effects.changed = true;
    }

    fn apply_number(settings: &mut Settings, kind: NumberKind, value: f32) {
        match kind {
            NumberKind::WordsFadeIn => {
                for layer in WORD_LAYERS {
                    settings.timings[layer.index()].fade_in = seconds(value);
                }
            }
            NumberKind::WordsFadeOut => {
                for layer in WORD_LAYERS {
                    settings.timings[layer.index()].fade_out = seconds(value);
                }
            }
            NumberKind::SecondsFadeOut => {
                settings.timings[LightLayer::Seconds.index()].fade_out = seconds(value);
            }
            NumberKind::TypingDelay => settings.typing_delay = seconds(value),
            NumberKind::RainbowSpread => settings.rainbow_spread = value,
            NumberKind::WordsEffectBrightness => {
                for layer in WORD_LAYERS {
                    settings.effect_brightness[layer.index()] = value;
                }
            }
            NumberKind::EffectSpeed => settings.effect_speed = value,
            NumberKind::SecondsEffectBrightness => {
                settings.effect_brightness[LightLayer::Seconds.index()] = value;
            }
        }
    }
}

/// Current value of a number control
pub fn number_value(settings: &Settings, kind: NumberKind) -> f32 {
    let seconds_of = |d: Duration| {
        #[allow(clippy::cast_precision_loss)]
        let ms = d.as_millis() as f32;
        ms / 1000.0
    };
    match kind {
        NumberKind::WordsFadeIn => seconds_of(settings.timings(LightLayer::Hours).fade_in),
        NumberKind::WordsFadeOut => seconds_of(settings.timings(LightLayer::Hours).fade_out),
        NumberKind::SecondsFadeOut => seconds_of(settings.timings(LightLayer::Seconds).fade_out),
        NumberKind::TypingDelay => seconds_of(settings.typing_delay),
        NumberKind::RainbowSpread => settings.rainbow_spread,
        NumberKind::WordsEffectBrightness => {
            settings.effect_brightness[LightLayer::Hours.index()]
        }
        NumberKind::EffectSpeed => settings.effect_speed,
        NumberKind::SecondsEffectBrightness => {
            settings.effect_brightness[LightLayer::Seconds.index()]
        }
    }
}

/// Non-negative seconds to a millisecond duration
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn seconds(value: f32) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::from_millis(0);
    }
    Duration::from_millis((value * 1000.0 + 0.5) as u64)
}
