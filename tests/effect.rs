mod tests {
    use core::f32::consts::{PI, TAU};

    use wordclock_composer::{
        Duration, EffectKind, EffectState, Rgb,
        effect::{ColorCycleEffect, EffectParams, EnvelopeEffect},
    };

    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_effect_names_round_trip() {
        for (index, name) in EffectKind::OPTIONS.iter().enumerate() {
            let kind = EffectKind::parse_from_str(name).unwrap();
            assert_eq!(kind.as_str(), *name);
            assert_eq!(EffectKind::from_raw(index as u8), Some(kind));
        }
        assert_eq!(EffectKind::parse_from_str("rainbow"), None);
        assert_eq!(EffectKind::from_raw(5), None);
    }

    #[test]
    fn test_period_scales_with_speed() {
        assert_eq!(EffectKind::None.period_ms(50.0), None);
        assert_eq!(EffectKind::Pulse.period_ms(60.0), Some(1000.0));
        assert_eq!(EffectKind::Breathe.period_ms(60.0), Some(4000.0));
        assert_eq!(EffectKind::Rainbow.period_ms(50.0), Some(15_000.0));
        assert_eq!(EffectKind::Rainbow.period_ms(0.0), Some(30_000.0));
        assert_eq!(EffectKind::Rainbow.period_ms(100.0), Some(2500.0));

        let slow = EffectKind::ColorCycle.period_ms(0.0).unwrap();
        let fast = EffectKind::ColorCycle.period_ms(100.0).unwrap();
        assert!(slow > fast);
    }

    #[test]
    fn test_phase_advances_and_wraps() {
        let mut state = EffectState::new(EffectKind::Pulse, 60.0);
        state.advance(Duration::from_millis(250));
        assert!((state.phase() - TAU / 4.0).abs() < 1e-4);

        for _ in 0..10 {
            state.advance(Duration::from_millis(250));
            assert!(state.phase() >= 0.0 && state.phase() < TAU);
        }
    }

    #[test]
    fn test_static_effect_keeps_phase() {
        let mut state = EffectState::new(EffectKind::None, 100.0);
        state.advance(Duration::from_millis(1000));
        assert_eq!(state.phase(), 0.0);

        let params = EffectParams::from_percent(50.0, 15.0);
        assert_eq!(state.apply(3, WHITE, &params), WHITE);
    }

    #[test]
    fn test_set_kind_resets_phase_only_on_change() {
        let mut state = EffectState::new(EffectKind::Rainbow, 100.0);
        state.advance(Duration::from_millis(500));
        let phase = state.phase();
        assert!(phase > 0.0);

        state.set_kind(EffectKind::Rainbow);
        assert_eq!(state.phase(), phase);

        state.set_kind(EffectKind::Breathe);
        assert_eq!(state.phase(), 0.0);
        assert_eq!(state.kind(), EffectKind::Breathe);
    }

    #[test]
    fn test_rainbow_spreads_hue_along_layer() {
        let state = EffectState::new(EffectKind::Rainbow, 10.0);
        let params = EffectParams::from_percent(100.0, 100.0);

        let first = state.apply(0, WHITE, &params);
        let second = state.apply(1, WHITE, &params);
        assert_eq!(first, Rgb { r: 255, g: 0, b: 0 });
        assert_ne!(first, second);

        let flat = EffectParams::from_percent(100.0, 0.0);
        assert_eq!(state.apply(0, WHITE, &flat), state.apply(9, WHITE, &flat));
    }

    #[test]
    fn test_rainbow_moves_at_slow_speed() {
        let mut state = EffectState::new(EffectKind::Rainbow, 1.0);
        let params = EffectParams::from_percent(100.0, 15.0);
        let mut before = state.apply(0, WHITE, &params);

        for _ in 0..40 {
            state.advance(Duration::from_millis(50));
            let after = state.apply(0, WHITE, &params);
            assert_ne!(after, before);
            before = after;
        }
        assert!(state.phase() > 0.0);
    }

    #[test]
    fn test_envelope_intensity_bounds() {
        let trough = 3.0 * PI / 2.0;
        let peak = PI / 2.0;

        let pulse = EnvelopeEffect::PULSE;
        assert!((pulse.intensity(trough, 0.5) - 0.3).abs() < 1e-4);
        assert!((pulse.intensity(peak, 0.5) - 1.0).abs() < 1e-4);

        let breathe = EnvelopeEffect::BREATHE;
        assert!((breathe.intensity(trough, 1.0) - 0.2).abs() < 1e-4);
        assert_eq!(breathe.intensity(peak, 1.0), 1.0);
        assert_eq!(breathe.intensity(peak, 0.0), 0.0);
    }

    #[test]
    fn test_color_cycle_steps_through_palette() {
        assert_eq!(ColorCycleEffect::color_at(0.0), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(
            ColorCycleEffect::color_at(TAU * 0.55),
            Rgb {
                r: 0,
                g: 255,
                b: 255
            }
        );
        assert_eq!(
            ColorCycleEffect::color_at(TAU * 0.999),
            Rgb {
                r: 255,
                g: 0,
                b: 255
            }
        );
    }
}
