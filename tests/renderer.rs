mod tests {
    use wordclock_composer::{
        BrightnessRange, ControlChannel, Duration, EffectKind, Language, LayerLight, LayerTimings,
        LedLayout, LedStrip, LightLayer, Renderer, Rgb, StripError, TickStatus, TimeSample,
        WordClockConfig, color::BLACK,
    };

    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    const GREY: Rgb = Rgb {
        r: 40,
        g: 40,
        b: 40,
    };

    /// IL EST DIX HEURES CINQ
    const TEN_OH_FIVE: [usize; 18] = [
        17, 18, 20, 21, 22, 81, 82, 83, 88, 89, 90, 91, 92, 93, 142, 141, 140, 139,
    ];

    struct RecordingStrip {
        pixels: [Rgb; 256],
        writes: usize,
        shows: usize,
        fail: bool,
    }

    impl RecordingStrip {
        fn new() -> Self {
            Self {
                pixels: [BLACK; 256],
                writes: 0,
                shows: 0,
                fail: false,
            }
        }
    }

    impl LedStrip for RecordingStrip {
        fn set_pixel(&mut self, index: usize, color: Rgb) {
            self.pixels[index] = color;
            self.writes += 1;
        }

        fn show(&mut self) -> Result<(), StripError> {
            self.shows += 1;
            if self.fail {
                return Err(StripError::WriteFailed);
            }
            Ok(())
        }
    }

    fn time(hour: u8, minute: u8, second: u8) -> Option<TimeSample> {
        TimeSample::new(hour, minute, second)
    }

    /// No fades, no effects, full-scale white words
    fn instant_config() -> WordClockConfig {
        let mut config = WordClockConfig::default();
        config.brightness_ranges = [BrightnessRange::FULL; LightLayer::COUNT];
        config.defaults.timings = [LayerTimings::INSTANT; LightLayer::COUNT];
        config.defaults.typing_delay = Duration::from_millis(0);
        config.defaults.effects = [EffectKind::None; LightLayer::COUNT];
        for light in &mut config.defaults.lights {
            light.brightness = 255;
        }
        config
    }

    #[test]
    fn test_instant_fade_lights_exact_leds() {
        let channel = ControlChannel::<4>::new();
        let config = instant_config();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();
        let mut strip = RecordingStrip::new();

        let status = renderer.tick(time(10, 5, 0), &mut strip).unwrap();
        assert_eq!(status, TickStatus::Rendered);
        assert_eq!(strip.writes, 256);
        assert_eq!(strip.shows, 1);

        for (index, color) in strip.pixels.iter().enumerate() {
            if TEN_OH_FIVE.contains(&index) {
                assert_eq!(*color, WHITE, "led {index} should be lit");
            } else {
                assert_eq!(*color, BLACK, "led {index} should be dark");
            }
        }
        assert_eq!(renderer.stats().lit, 18);
        assert_eq!(renderer.stats().dropped, 0);
    }

    #[test]
    fn test_words_drawn_over_background() {
        let channel = ControlChannel::<4>::new();
        let mut config = instant_config();
        config.defaults.lights[LightLayer::Background.index()] = LayerLight::new(true, GREY, 255);
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        renderer.render(time(10, 5, 0));
        let frame = renderer.frame();

        assert_eq!(frame[17], WHITE);
        assert_eq!(frame[1], GREY);
        // Frame corners stay dark
        assert_eq!(frame[0], BLACK);
        assert_eq!(frame[255], BLACK);
    }

    #[test]
    fn test_hours_layer_used_when_words_off() {
        let channel = ControlChannel::<4>::new();
        let mut config = instant_config();
        let teal = Rgb { r: 0, g: 128, b: 128 };
        config.defaults.lights[LightLayer::Words.index()].on = false;
        config.defaults.lights[LightLayer::Hours.index()] = LayerLight::new(true, teal, 255);
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        renderer.render(time(10, 5, 0));
        assert_eq!(renderer.frame()[81], teal);
        assert_ne!(renderer.frame()[142], teal);
    }

    #[test]
    fn test_unsynchronized_clock_writes_nothing() {
        let channel = ControlChannel::<4>::new();
        let config = instant_config();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();
        let mut strip = RecordingStrip::new();

        let status = renderer.tick(None, &mut strip).unwrap();
        assert_eq!(status, TickStatus::Unsynchronized);
        assert_eq!(strip.writes, 0);
        assert_eq!(strip.shows, 0);

        renderer.tick(time(10, 5, 0), &mut strip).unwrap();
        let writes = strip.writes;
        renderer.tick(None, &mut strip).unwrap();
        assert_eq!(strip.writes, writes);
        assert_eq!(renderer.last_sample(), time(10, 5, 0));
    }

    #[test]
    fn test_strip_failure_is_reported_and_state_advances() {
        let channel = ControlChannel::<4>::new();
        let config = instant_config();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();
        let mut strip = RecordingStrip::new();
        strip.fail = true;

        let result = renderer.tick(time(10, 5, 0), &mut strip);
        assert_eq!(result, Err(StripError::WriteFailed));
        assert_eq!(renderer.frame()[17], WHITE);

        strip.fail = false;
        assert_eq!(
            renderer.tick(time(10, 5, 1), &mut strip),
            Ok(TickStatus::Rendered)
        );
    }

    #[test]
    fn test_rainbow_changes_between_ticks() {
        let channel = ControlChannel::<4>::new();
        let mut config = instant_config();
        config.defaults.effects[LightLayer::Words.index()] = EffectKind::Rainbow;
        config.defaults.effect_brightness[LightLayer::Words.index()] = 100.0;
        config.defaults.effect_speed = 1.0;
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();
        assert_eq!(
            renderer.tick_interval(),
            WordClockConfig::default().tick_interval
        );

        renderer.render(time(10, 5, 0));
        let mut phase = renderer.effect_state(LightLayer::Words).phase();
        let mut color = renderer.frame()[17];

        for _ in 0..40 {
            renderer.render(time(10, 5, 0));
            let next_phase = renderer.effect_state(LightLayer::Words).phase();
            let next_color = renderer.frame()[17];
            assert!(next_phase > phase);
            assert_ne!(next_color, color);
            phase = next_phase;
            color = next_color;
        }
    }

    #[test]
    fn test_fade_in_with_typing_delay() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        renderer.render(time(10, 5, 0));

        // First letter starts fading at once, the last one waits its turn
        let first = renderer.fade_state(17).unwrap();
        let last = renderer.fade_state(139).unwrap();
        assert!(first.current() > 0.0 && first.current() < 1.0);
        assert_eq!(last.current(), 0.0);
        assert_eq!(last.target(), 1.0);
    }

    #[test]
    fn test_words_fade_out_when_time_changes() {
        let channel = ControlChannel::<4>::new();
        let mut config = instant_config();
        config.defaults.timings[LightLayer::Words.index()] =
            LayerTimings::new(Duration::from_millis(0), Duration::from_millis(1000));
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        renderer.render(time(10, 5, 0));
        // CINQ -> DIX
        renderer.render(time(10, 10, 0));

        let cinq = renderer.fade_state(142).unwrap();
        assert_eq!(cinq.target(), 0.0);
        assert!(cinq.current() > 0.0 && cinq.current() < 1.0);
        assert_eq!(renderer.fade_state(174).unwrap().current(), 1.0);
    }

    #[test]
    fn test_words_erased_from_last_letter() {
        let channel = ControlChannel::<4>::new();
        let mut config = instant_config();
        config.defaults.timings[LightLayer::Words.index()] =
            LayerTimings::new(Duration::from_millis(0), Duration::from_millis(1000));
        config.defaults.typing_delay = Duration::from_millis(130);
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        renderer.render(time(10, 5, 0));
        renderer.render(time(10, 10, 0));

        // CINQ is 142 141 140 139, the Q goes first
        let last = renderer.fade_state(139).unwrap();
        let first = renderer.fade_state(142).unwrap();
        assert_eq!(last.target(), 0.0);
        assert!(last.current() < 1.0);
        assert_eq!(first.target(), 0.0);
        assert_eq!(first.current(), 1.0);

        // 3 x 130 ms later the first letter has started as well
        for _ in 0..9 {
            renderer.render(time(10, 10, 0));
        }
        assert!(renderer.fade_state(142).unwrap().current() < 1.0);
        assert!(
            renderer.fade_state(139).unwrap().current()
                < renderer.fade_state(142).unwrap().current()
        );
    }

    #[test]
    fn test_language_switch_clears_fades() {
        let channel = ControlChannel::<4>::new();
        let mut config = instant_config();
        config.defaults.timings[LightLayer::Words.index()] =
            LayerTimings::new(Duration::from_millis(0), Duration::from_millis(1000));
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        renderer.render(time(10, 5, 0));
        // EST
        assert_eq!(renderer.fade_state(22).unwrap().current(), 1.0);

        renderer.set_language(Language::EnglishUk).unwrap();
        renderer.render(time(10, 5, 1));

        assert_eq!(renderer.fade_state(22).unwrap().current(), 0.0);
        assert_eq!(renderer.frame()[22], BLACK);
        // IT
        assert_eq!(renderer.frame()[17], WHITE);
    }

    #[test]
    fn test_power_estimate_counts_drawable_leds() {
        let channel = ControlChannel::<4>::new();
        let config = instant_config();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        // 240 idle mA plus 18 white LEDs at 36 mA, at 5 V
        renderer.render(time(10, 5, 0));
        assert_eq!(renderer.stats().power_mw, 4440);

        renderer.set_power(false).unwrap();
        renderer.render(time(10, 5, 1));
        assert_eq!(renderer.stats().power_mw, 1200);
    }

    #[test]
    fn test_setters_apply_on_next_tick() {
        let channel = ControlChannel::<4>::new();
        let config = instant_config();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        renderer.set_effect(LightLayer::Words, EffectKind::Pulse).unwrap();
        renderer.set_fade_duration(LightLayer::Seconds, Duration::from_millis(500)).unwrap();
        assert_eq!(renderer.settings().effect(LightLayer::Words), EffectKind::None);

        renderer.render(time(10, 5, 0));
        assert_eq!(renderer.settings().effect(LightLayer::Words), EffectKind::Pulse);
        assert_eq!(
            renderer.settings().timings(LightLayer::Seconds),
            LayerTimings::new(Duration::from_millis(500), Duration::from_millis(500))
        );
        assert!(renderer.take_dirty());
        assert!(!renderer.take_dirty());
    }

    #[test]
    fn test_power_off_renders_black() {
        let channel = ControlChannel::<4>::new();
        let config = instant_config();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();
        let mut strip = RecordingStrip::new();

        renderer.tick(time(10, 5, 0), &mut strip).unwrap();
        renderer.set_power(false).unwrap();
        let status = renderer.tick(time(10, 5, 1), &mut strip).unwrap();

        assert_eq!(status, TickStatus::PoweredOff);
        assert!(strip.pixels.iter().all(|c| *c == BLACK));
    }

    #[test]
    fn test_factory_reset_is_idempotent() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        renderer.set_effect(LightLayer::Hours, EffectKind::Breathe).unwrap();
        renderer.set_effect_speed(80.0).unwrap();
        renderer.render(time(10, 5, 0));
        renderer.render(time(10, 5, 1));

        renderer.factory_reset();
        let settings = renderer.settings().clone();
        let effect = *renderer.effect_state(LightLayer::Words);
        let fades: Vec<_> = (0..256).map(|i| renderer.fade_state(i)).collect();

        renderer.factory_reset();
        assert_eq!(renderer.settings(), &settings);
        assert_eq!(*renderer.effect_state(LightLayer::Words), effect);
        let fades_again: Vec<_> = (0..256).map(|i| renderer.fade_state(i)).collect();
        assert_eq!(fades, fades_again);

        assert_eq!(renderer.settings(), &config.defaults);
        assert_eq!(renderer.effect_state(LightLayer::Words).phase(), 0.0);
    }

    #[test]
    fn test_short_strip_drops_out_of_range_leds() {
        static EXCLUDED: [u16; 0] = [];
        let channel = ControlChannel::<4>::new();
        let mut config = instant_config();
        config.layout = LedLayout::new(100, &EXCLUDED);
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();
        let mut strip = RecordingStrip::new();

        renderer.tick(time(10, 5, 0), &mut strip).unwrap();

        // CINQ lives at 139-142
        assert_eq!(renderer.stats().dropped, 4);
        assert_eq!(strip.writes, 100);
        assert_eq!(renderer.frame().len(), 100);
        assert_eq!(renderer.frame()[17], WHITE);
    }

    #[test]
    fn test_layout_larger_than_buffer_is_rejected() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let result = Renderer::<128, 4>::new(channel.receiver(), &config);
        assert!(result.is_err());
    }
}
