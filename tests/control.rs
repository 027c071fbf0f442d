mod tests {
    use wordclock_composer::{
        Control, ControlChannel, ControlError, ControlHandle, ControlSurface, ControlValue,
        EffectKind, Language, LightLayer, NumberKind, Renderer, SelectKind, TimeSample,
        WordClockConfig,
    };

    fn tick(renderer: &mut Renderer<'_, 256, 4>) {
        renderer.render(TimeSample::new(10, 5, 0));
    }

    #[test]
    fn test_rejected_writes_keep_state() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        assert_eq!(
            renderer.set_value(
                Control::Select(SelectKind::Effect(LightLayer::Words)),
                ControlValue::Select("Sparkle"),
            ),
            Err(ControlError::UnknownOption)
        );
        assert_eq!(
            renderer.set_value(
                Control::Number(NumberKind::EffectSpeed),
                ControlValue::Number(150.0)
            ),
            Err(ControlError::OutOfRange)
        );
        assert_eq!(
            renderer.set_value(Control::Power, ControlValue::Number(1.0)),
            Err(ControlError::TypeMismatch)
        );

        tick(&mut renderer);
        assert_eq!(renderer.settings(), &config.defaults);
        assert!(!renderer.take_dirty());
    }

    #[test]
    fn test_negative_fade_means_no_fade() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        renderer
            .set_value(
                Control::Number(NumberKind::WordsFadeIn),
                ControlValue::Number(-2.0),
            )
            .unwrap();
        tick(&mut renderer);

        assert_eq!(
            renderer.get_value(Control::Number(NumberKind::WordsFadeIn)),
            ControlValue::Number(0.0)
        );
        for layer in [LightLayer::Hours, LightLayer::Minutes, LightLayer::Words] {
            assert_eq!(renderer.settings().timings(layer).fade_in.as_millis(), 0);
        }
    }

    #[test]
    fn test_default_values_are_reported() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        assert_eq!(renderer.get_value(Control::Power), ControlValue::Switch(true));
        assert_eq!(
            renderer.get_value(Control::Select(SelectKind::SecondsMode)),
            ControlValue::Select("Current second")
        );
        assert_eq!(
            renderer.get_value(Control::Select(SelectKind::Effect(LightLayer::Words))),
            ControlValue::Select("Rainbow")
        );
        assert_eq!(
            renderer.get_value(Control::Select(SelectKind::Language)),
            ControlValue::Select("Francais")
        );
        assert_eq!(
            renderer.get_value(Control::Number(NumberKind::EffectSpeed)),
            ControlValue::Number(10.0)
        );
        let ControlValue::Number(delay) =
            renderer.get_value(Control::Number(NumberKind::TypingDelay))
        else {
            panic!("typing delay is a number");
        };
        assert!((delay - 0.13).abs() < 1e-6);
        assert_eq!(renderer.get_value(Control::FactoryReset), ControlValue::Press);
    }

    #[test]
    fn test_handle_sends_through_channel() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();
        let handle = ControlHandle::new(channel.sender(), config.number_bounds);

        handle
            .set_value(
                Control::Select(SelectKind::Language),
                ControlValue::Select("en_uk"),
            )
            .unwrap();
        handle
            .set_value(
                Control::Select(SelectKind::Effect(LightLayer::Seconds)),
                ControlValue::Select("Color cycle"),
            )
            .unwrap();
        assert_eq!(renderer.settings().language, Language::French);

        tick(&mut renderer);
        assert_eq!(renderer.settings().language, Language::EnglishUk);
        assert_eq!(
            renderer.settings().effect(LightLayer::Seconds),
            EffectKind::ColorCycle
        );
        assert_eq!(
            renderer.get_value(Control::Select(SelectKind::Language)),
            ControlValue::Select("English UK")
        );
        // IT IS
        assert!(renderer.mask().contains(LightLayer::Hours, 17));
    }

    #[test]
    fn test_handle_rejects_when_channel_full() {
        let channel = ControlChannel::<2>::new();
        let config = WordClockConfig::default();
        let handle = ControlHandle::new(channel.sender(), config.number_bounds);

        handle.set_value(Control::Power, ControlValue::Switch(false)).unwrap();
        handle.set_value(Control::Power, ControlValue::Switch(true)).unwrap();
        assert_eq!(
            handle.set_value(Control::Power, ControlValue::Switch(false)),
            Err(ControlError::QueueFull)
        );
        assert_eq!(
            handle.set_value(
                Control::Number(NumberKind::RainbowSpread),
                ControlValue::Number(101.0)
            ),
            Err(ControlError::OutOfRange)
        );
    }

    #[test]
    fn test_pending_queue_is_bounded() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();

        for _ in 0..16 {
            renderer.set_power(true).unwrap();
        }
        assert_eq!(renderer.set_power(false), Err(ControlError::QueueFull));

        tick(&mut renderer);
        assert!(renderer.set_power(false).is_ok());
    }

    #[test]
    fn test_factory_reset_press_is_immediate() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();
        let handle = ControlHandle::new(channel.sender(), config.number_bounds);

        renderer
            .set_value(
                Control::Select(SelectKind::SecondsMode),
                ControlValue::Select("Inverted"),
            )
            .unwrap();
        tick(&mut renderer);
        assert_ne!(renderer.settings(), &config.defaults);

        // Queued writes are discarded by the reset
        handle.set_value(Control::Power, ControlValue::Switch(false)).unwrap();
        renderer
            .set_value(Control::FactoryReset, ControlValue::Press)
            .unwrap();
        assert_eq!(renderer.settings(), &config.defaults);

        tick(&mut renderer);
        assert_eq!(renderer.settings(), &config.defaults);
        assert!(renderer.take_dirty());
    }

    #[test]
    fn test_factory_reset_through_channel() {
        let channel = ControlChannel::<4>::new();
        let config = WordClockConfig::default();
        let mut renderer = Renderer::<256, 4>::new(channel.receiver(), &config).unwrap();
        let handle = ControlHandle::new(channel.sender(), config.number_bounds);

        renderer.set_effect(LightLayer::Words, EffectKind::Breathe).unwrap();
        tick(&mut renderer);

        handle
            .set_value(Control::FactoryReset, ControlValue::Press)
            .unwrap();
        assert_eq!(renderer.settings().effect(LightLayer::Words), EffectKind::Breathe);

        tick(&mut renderer);
        assert_eq!(renderer.settings(), &config.defaults);
    }

    #[test]
    fn test_select_options() {
        assert_eq!(
            SelectKind::SecondsMode.options(),
            &["Current second", "Seconds passed", "Inverted"]
        );
        assert_eq!(SelectKind::Language.options(), &["Francais", "English UK"]);
        assert_eq!(
            SelectKind::Effect(LightLayer::Hours).options().len(),
            EffectKind::OPTIONS.len()
        );
    }

    #[test]
    fn test_number_kind_names() {
        for kind in NumberKind::ALL {
            assert_eq!(NumberKind::parse_from_str(kind.as_str()), Some(kind));
            assert_eq!(NumberKind::from_raw(kind as u8), Some(kind));
        }
        assert_eq!(NumberKind::parse_from_str("brightness"), None);
    }
}
