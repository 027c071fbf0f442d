use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::LedStrip;
use crate::clock::TimeSample;
use crate::color::{BLACK, Rgb, blend_colors};
use crate::config::{BrightnessRange, WordClockConfig};
use crate::control::{Control, ControlSurface, ControlValue, NumberBounds, NumberKind, SelectKind};
use crate::effect::{EffectKind, EffectState};
use crate::error::{ConfigError, ControlError, StripError};
use crate::fade::FadeState;
use crate::intent::ControlIntent;
use crate::intent_processor::{ControlProcessor, ControlReceiver, IntentEffects, number_value};
use crate::language::Language;
use crate::layer::LightLayer;
use crate::layout::LedLayout;
use crate::math8::{ease_in_out_quad, unit8};
use crate::settings::{LayerLight, Settings};
use crate::word_mask::{MinutePrecision, SecondsMode, WordMask, word_mask};

/// Idle draw of one WS2812B, in mA
const LED_IDLE_MA: u32 = 1;
/// Draw of one fully lit color channel, in mA
const LED_CHANNEL_MA: u32 = 12;
/// Strip supply voltage
const LED_SUPPLY_V: u32 = 5;

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// A frame was computed
    Rendered,
    /// Power is off, the frame is black
    PoweredOff,
    /// Clock not synchronized, nothing was rendered
    Unsynchronized,
}

/// Figures about the last rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Pixels that are not black
    pub lit: u16,
    /// Mask entries outside the strip
    pub dropped: u16,
    /// Estimated strip power draw
    pub power_mw: u32,
}

/// Layer claim on one LED for the current tick
#[derive(Debug, Clone, Copy)]
struct Claim {
    layer: LightLayer,
    /// Position of the LED within its layer, in reading order
    ordinal: u16,
}

/// Animation state of one LED
#[derive(Debug, Clone, Copy)]
struct PixelState {
    /// Layer that colors the LED, kept while it fades out
    owner: Option<LightLayer>,
    ordinal: u16,
    fade: FadeState,
    /// Remaining typing delay before the fade-in starts
    hold: Duration,
}

impl PixelState {
    const DARK: Self = Self {
        owner: None,
        ordinal: 0,
        fade: FadeState::DARK,
        hold: Duration::from_millis(0),
    };
}

/// Word clock renderer - the animation engine
///
/// Owns settings, per-layer effect phases and per-LED fades. Each call to
/// [`render`](Self::render) drains pending control intents, then computes one
/// frame.
pub struct Renderer<'a, const MAX_LEDS: usize, const INTENT_CHANNEL_SIZE: usize> {
    // External dependencies and configuration
    controls: ControlProcessor<'a, INTENT_CHANNEL_SIZE>,
    layout: LedLayout,
    tick_interval: Duration,
    precision: MinutePrecision,
    brightness_ranges: [BrightnessRange; LightLayer::COUNT],
    number_bounds: [NumberBounds; NumberKind::COUNT],
    defaults: Settings,

    // Internal state
    settings: Settings,
    effects: [EffectState; LightLayer::COUNT],
    pixels: [PixelState; MAX_LEDS],
    frame_buffer: [Rgb; MAX_LEDS],
    mask: WordMask,
    /// Mask replaced by the last update, consumed by the next retarget
    previous_mask: WordMask,
    mask_sample: Option<TimeSample>,
    mask_stale: bool,
    last_sample: Option<TimeSample>,
    stats: FrameStats,
    dirty: bool,
}

impl<'a, const MAX_LEDS: usize, const INTENT_CHANNEL_SIZE: usize>
    Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE>
{
    /// Create a renderer that starts from `config.defaults`
    pub fn new(
        intents: ControlReceiver<'a, INTENT_CHANNEL_SIZE>,
        config: &WordClockConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_settings(intents, config, config.defaults.clone())
    }

    /// Create a renderer from previously persisted settings
    pub fn with_settings(
        intents: ControlReceiver<'a, INTENT_CHANNEL_SIZE>,
        config: &WordClockConfig,
        settings: Settings,
    ) -> Result<Self, ConfigError> {
        config.validate(MAX_LEDS)?;
        Ok(Self {
            controls: ControlProcessor::new(intents),
            layout: config.layout,
            tick_interval: config.tick_interval,
            precision: config.precision,
            brightness_ranges: config.brightness_ranges,
            number_bounds: config.number_bounds,
            defaults: config.defaults.clone(),
            effects: effect_states(&settings),
            settings,
            pixels: [PixelState::DARK; MAX_LEDS],
            frame_buffer: [BLACK; MAX_LEDS],
            mask: WordMask::new(),
            previous_mask: WordMask::new(),
            mask_sample: None,
            mask_stale: true,
            last_sample: None,
            stats: FrameStats::default(),
            dirty: false,
        })
    }

    /// Compute one frame
    ///
    /// `sample` is `None` while the clock is not synchronized. In that case
    /// the previous frame is kept and no state advances.
    pub fn render(&mut self, sample: Option<TimeSample>) -> TickStatus {
        self.process_intents();

        let Some(sample) = sample else {
            #[cfg(feature = "esp32-log")]
            if self.last_sample.is_some() && self.mask_sample.is_some() {
                println!("[Renderer.render] clock lost sync, holding last frame");
            }
            self.mask_sample = None;
            return TickStatus::Unsynchronized;
        };
        #[cfg(feature = "esp32-log")]
        if self.mask_sample.is_none() {
            println!(
                "[Renderer.render] clock synced at {:02}:{:02}:{:02}",
                sample.hour(),
                sample.minute(),
                sample.second()
            );
        }
        self.last_sample = Some(sample);

        if !self.settings.power {
            self.power_off();
            return TickStatus::PoweredOff;
        }

        if self.mask_stale || self.mask_sample != Some(sample) {
            self.update_mask(sample);
        }

        self.advance_effects();
        let claims = self.claim_leds();
        self.retarget_fades(&claims);
        self.advance_fades();
        self.compose();

        TickStatus::Rendered
    }

    /// Render a frame and push it to the strip
    ///
    /// Nothing is written while the clock is unsynchronized. A failing
    /// `show()` is returned after the engine state has advanced.
    pub fn tick<S: LedStrip>(
        &mut self,
        sample: Option<TimeSample>,
        strip: &mut S,
    ) -> Result<TickStatus, StripError> {
        let status = self.render(sample);
        if status == TickStatus::Unsynchronized {
            return Ok(status);
        }

        for (index, color) in self.frame().iter().enumerate() {
            strip.set_pixel(index, *color);
        }
        strip.show().inspect_err(|_err| {
            #[cfg(feature = "esp32-log")]
            println!("[Renderer.tick] strip write failed: {}", _err);
        })?;

        Ok(status)
    }

    /// Restore default settings and clear all animation state.
    ///
    /// Pending control intents are discarded.
    pub fn factory_reset(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[Renderer.factory_reset] restoring defaults");
        self.controls.clear();
        self.settings.clone_from(&self.defaults);
        self.reset_animation();
        self.dirty = true;
    }

    /// Queue fade-in and fade-out durations for a layer
    pub fn set_fade_duration(
        &mut self,
        layer: LightLayer,
        duration: Duration,
    ) -> Result<(), ControlError> {
        self.controls.enqueue(ControlIntent::SetFade {
            layer,
            fade_in: Some(duration),
            fade_out: Some(duration),
        })
    }

    /// Queue an effect change for a layer
    pub fn set_effect(&mut self, layer: LightLayer, kind: EffectKind) -> Result<(), ControlError> {
        self.controls.enqueue(ControlIntent::SetEffect(layer, kind))
    }

    /// Queue a new shared effect speed (0-100)
    pub fn set_effect_speed(&mut self, speed: f32) -> Result<(), ControlError> {
        self.set_number(NumberKind::EffectSpeed, speed)
    }

    pub fn set_seconds_mode(&mut self, mode: SecondsMode) -> Result<(), ControlError> {
        self.controls.enqueue(ControlIntent::SetSecondsMode(mode))
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), ControlError> {
        self.controls.enqueue(ControlIntent::SetLanguage(language))
    }

    pub fn set_light(&mut self, layer: LightLayer, light: LayerLight) -> Result<(), ControlError> {
        self.controls.enqueue(ControlIntent::SetLight(layer, light))
    }

    pub fn set_power(&mut self, on: bool) -> Result<(), ControlError> {
        self.controls.enqueue(ControlIntent::SetPower(on))
    }

    /// Validate and queue a number control value
    pub fn set_number(&mut self, kind: NumberKind, value: f32) -> Result<(), ControlError> {
        let intent = ControlIntent::parse(
            Control::Number(kind),
            ControlValue::Number(value),
            &self.number_bounds,
        )?;
        self.controls.enqueue(intent)
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub const fn effect_state(&self, layer: LightLayer) -> &EffectState {
        &self.effects[layer.index()]
    }

    /// Fade of one LED, `None` outside the strip
    pub fn fade_state(&self, index: usize) -> Option<FadeState> {
        self.pixels[..self.layout.count()]
            .get(index)
            .map(|pixel| pixel.fade)
    }

    /// Last computed frame, one color per strip LED
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer[..self.layout.count()]
    }

    /// Word mask of the last rendered time
    pub const fn mask(&self) -> &WordMask {
        &self.mask
    }

    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Last valid time sample seen
    pub const fn last_sample(&self) -> Option<TimeSample> {
        self.last_sample
    }

    /// Time step that fades and effect phases advance by on each tick
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub const fn number_bounds(&self) -> &[NumberBounds; NumberKind::COUNT] {
        &self.number_bounds
    }

    /// Returns true once after any applied settings change, so the host can
    /// persist them.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    /// Process pending intents (non-blocking)
    fn process_intents(&mut self) {
        let effects = self
            .controls
            .process_pending(&mut self.settings, &self.defaults);

        self.apply_effects(effects);
    }

    /// Apply side effects from intent processing
    fn apply_effects(&mut self, effects: IntentEffects) {
        if effects.factory_reset {
            self.reset_animation();
        } else if effects.language_changed {
            // Old words must not fade out on the new face
            self.pixels = [PixelState::DARK; MAX_LEDS];
            self.previous_mask = WordMask::new();
        }
        self.mask_stale |= effects.mask_stale;
        self.dirty |= effects.changed;
    }

    fn reset_animation(&mut self) {
        self.effects = effect_states(&self.settings);
        self.pixels = [PixelState::DARK; MAX_LEDS];
        self.previous_mask = WordMask::new();
        self.mask_stale = true;
    }

    fn power_off(&mut self) {
        self.pixels = [PixelState::DARK; MAX_LEDS];
        self.frame_buffer = [BLACK; MAX_LEDS];
        self.stats = FrameStats {
            lit: 0,
            dropped: 0,
            power_mw: power_estimate_mw(self.frame(), &self.layout),
        };
    }

    fn update_mask(&mut self, sample: TimeSample) {
        let mask = word_mask(
            sample,
            self.settings.language,
            self.settings.seconds_mode,
            self.precision,
        );
        self.previous_mask = core::mem::replace(&mut self.mask, mask);
        self.mask_sample = Some(sample);
        self.mask_stale = false;

        #[cfg(feature = "esp32-log")]
        {
            let layout = self.layout;
            let dropped = self
                .mask
                .iter()
                .filter(|led| !layout.contains(led.index))
                .count();
            if dropped > 0 || self.mask.overflow() > 0 {
                println!(
                    "[Renderer.update_mask] dropped {} out of range, {} over capacity",
                    dropped,
                    self.mask.overflow()
                );
            }
        }
    }

    fn advance_effects(&mut self) {
        for layer in LightLayer::ALL {
            let state = &mut self.effects[layer.index()];
            state.set_kind(self.settings.effect(layer));
            state.set_speed(self.settings.effect_speed);
            state.advance(self.tick_interval);
        }
    }

    /// Resolve the owning layer of every LED for this tick
    fn claim_leds(&mut self) -> [Option<Claim>; MAX_LEDS] {
        let mut claims: [Option<Claim>; MAX_LEDS] = [None; MAX_LEDS];
        let mut ordinals = [0_u16; LightLayer::COUNT];
        let words_on = self.settings.light(LightLayer::Words).on;
        let mut dropped: u16 = 0;

        for led in self.mask.iter() {
            let index = usize::from(led.index);
            if !self.layout.contains(led.index) || index >= MAX_LEDS {
                dropped = dropped.saturating_add(1);
                continue;
            }
            if !self.layout.is_drawable(led.index) {
                continue;
            }

            let layer = if words_on && led.layer.is_word() {
                LightLayer::Words
            } else {
                led.layer
            };
            if !self.settings.light(layer).on {
                continue;
            }

            let ordinal = &mut ordinals[layer.index()];
            let claim = Claim {
                layer,
                ordinal: *ordinal,
            };
            *ordinal = ordinal.saturating_add(1);

            match claims[index] {
                Some(existing) if existing.layer.priority() > layer.priority() => {}
                _ => claims[index] = Some(claim),
            }
        }

        self.stats.dropped = dropped;
        claims
    }

    /// Point every LED's fade at its new target
    fn retarget_fades(&mut self, claims: &[Option<Claim>; MAX_LEDS]) {
        let typing_delay = self.settings.typing_delay;
        let mut typed: u32 = 0;

        // Reading order, so typing staggers word by word
        for led in self.mask.iter() {
            let Some(claim) = claims.get(usize::from(led.index)).copied().flatten() else {
                continue;
            };
            let pixel = &mut self.pixels[usize::from(led.index)];
            pixel.owner = Some(claim.layer);
            pixel.ordinal = claim.ordinal;
            if pixel.fade.target() >= 1.0 {
                continue;
            }

            let fade_in = self.settings.timings(claim.layer).fade_in;
            pixel.fade.retarget(1.0, fade_in);
            pixel.hold = Duration::from_millis(0);
            if claim.layer.is_word() && fade_in.as_millis() > 0 {
                pixel.hold = typing_delay * typed;
                typed += 1;
            }
        }

        // Words leaving the face are erased from the last letter backwards
        let previous = core::mem::take(&mut self.previous_mask);
        let mut erased: u32 = 0;
        for led in previous.iter().rev() {
            let index = usize::from(led.index);
            if claims.get(index).copied().flatten().is_some() {
                continue;
            }
            let Some(pixel) = self.pixels.get_mut(index) else {
                continue;
            };
            let Some(owner) = pixel.owner.filter(|layer| layer.is_word()) else {
                continue;
            };
            let fade_out = self.settings.timings(owner).fade_out;
            if pixel.fade.target() <= 0.0 || fade_out.as_millis() == 0 {
                continue;
            }
            pixel.fade.retarget(0.0, fade_out);
            pixel.hold = typing_delay * erased;
            erased += 1;
        }

        for (pixel, claim) in self.pixels.iter_mut().zip(claims.iter()) {
            if claim.is_some() || pixel.fade.target() <= 0.0 {
                continue;
            }
            let fade_out = pixel
                .owner
                .map_or(Duration::from_millis(0), |layer| {
                    self.settings.timings(layer).fade_out
                });
            pixel.fade.retarget(0.0, fade_out);
            pixel.hold = Duration::from_millis(0);
        }
    }

    fn advance_fades(&mut self) {
        let tick = self.tick_interval;
        for pixel in &mut self.pixels {
            // Typing delay before a fade starts
            if pixel.hold.as_millis() > 0 {
                pixel.hold = pixel
                    .hold
                    .checked_sub(tick)
                    .unwrap_or(Duration::from_millis(0));
                continue;
            }
            pixel.fade.advance(tick);
            if pixel.fade.is_settled() && pixel.fade.current() <= 0.0 {
                pixel.owner = None;
            }
        }
    }

    /// Blend every LED over the background and update frame stats
    fn compose(&mut self) {
        let background = self.settings.light(LightLayer::Background);
        let background_base = background.scaled(self.range(LightLayer::Background));
        let background_params = self.settings.effect_params(LightLayer::Background);
        let background_effect = self.effects[LightLayer::Background.index()];

        let mut layer_on = [false; LightLayer::COUNT];
        let mut layer_base = [BLACK; LightLayer::COUNT];
        let mut layer_params = [background_params; LightLayer::COUNT];
        for layer in LightLayer::ALL {
            let light = self.settings.light(layer);
            layer_on[layer.index()] = light.on;
            layer_base[layer.index()] = light.scaled(self.range(layer));
            layer_params[layer.index()] = self.settings.effect_params(layer);
        }

        let mut lit: u16 = 0;
        for (index, color) in self.frame_buffer.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let led = index as u16;
            if !self.layout.is_drawable(led) {
                *color = BLACK;
                continue;
            }

            let under = if background.on {
                background_effect.apply(led, background_base, &background_params)
            } else {
                BLACK
            };

            let pixel = &self.pixels[index];
            *color = match pixel.owner {
                // A layer switched off stops drawing at once, even mid-fade
                Some(layer) if layer_on[layer.index()] && pixel.fade.current() > 0.0 => {
                    let i = layer.index();
                    let over = self.effects[i].apply(pixel.ordinal, layer_base[i], &layer_params[i]);
                    blend_colors(under, over, ease_in_out_quad(unit8(pixel.fade.current())))
                }
                _ => under,
            };

            if *color != BLACK {
                lit = lit.saturating_add(1);
            }
        }

        self.stats.lit = lit;
        self.stats.power_mw = power_estimate_mw(self.frame(), &self.layout);
    }

    const fn range(&self, layer: LightLayer) -> BrightnessRange {
        self.brightness_ranges[layer.index()]
    }
}

impl<const MAX_LEDS: usize, const INTENT_CHANNEL_SIZE: usize> ControlSurface
    for Renderer<'_, MAX_LEDS, INTENT_CHANNEL_SIZE>
{
    fn set_value(
        &mut self,
        control: Control,
        value: ControlValue<'_>,
    ) -> Result<(), ControlError> {
        match ControlIntent::parse(control, value, &self.number_bounds)? {
            ControlIntent::FactoryReset => {
                self.factory_reset();
                Ok(())
            }
            intent => self.controls.enqueue(intent),
        }
    }

    fn get_value(&self, control: Control) -> ControlValue<'static> {
        match control {
            Control::Power => ControlValue::Switch(self.settings.power),
            Control::Light(layer) => ControlValue::Light(self.settings.light(layer)),
            Control::Number(kind) => ControlValue::Number(number_value(&self.settings, kind)),
            Control::Select(SelectKind::SecondsMode) => {
                ControlValue::Select(self.settings.seconds_mode.as_str())
            }
            Control::Select(SelectKind::Effect(layer)) => {
                ControlValue::Select(self.settings.effect(layer).as_str())
            }
            Control::Select(SelectKind::Language) => {
                ControlValue::Select(self.settings.language.as_str())
            }
            Control::FactoryReset => ControlValue::Press,
        }
    }
}

fn effect_states(settings: &Settings) -> [EffectState; LightLayer::COUNT] {
    LightLayer::ALL.map(|layer| EffectState::new(settings.effect(layer), settings.effect_speed))
}

/// Estimated draw of a frame: idle current per drawable LED plus a linear
/// share of the full per-channel current.
fn power_estimate_mw(frame: &[Rgb], layout: &LedLayout) -> u32 {
    let channel_sum: u32 = frame
        .iter()
        .map(|c| u32::from(c.r) + u32::from(c.g) + u32::from(c.b))
        .sum();
    #[allow(clippy::cast_possible_truncation)]
    let drawable = (0..frame.len())
        .filter(|&index| layout.is_drawable(index as u16))
        .count() as u32;
    let idle_ma = LED_IDLE_MA * drawable;
    let active_ma = channel_sum * LED_CHANNEL_MA / 255;
    (idle_ma + active_ma) * LED_SUPPLY_V
}
