mod tests {
    use wordclock_composer::{Duration, FadeState};

    const TICK: Duration = Duration::from_millis(50);

    #[test]
    fn test_fade_in_converges_monotonically() {
        let mut fade = FadeState::DARK;
        fade.retarget(1.0, Duration::from_millis(1000));

        let mut previous = fade.current();
        let mut ticks = 0;
        while !fade.is_settled() {
            fade.advance(TICK);
            ticks += 1;
            assert!(fade.current() >= previous);
            assert!(fade.current() <= 1.0);
            previous = fade.current();
            assert!(ticks <= 21, "fade did not settle");
        }
        assert_eq!(fade.current(), 1.0);
        assert!(ticks >= 20);
    }

    #[test]
    fn test_fade_out_never_undershoots() {
        let mut fade = FadeState::new(1.0);
        fade.retarget(0.0, Duration::from_millis(120));

        fade.advance(TICK);
        assert!(fade.current() < 1.0 && fade.current() > 0.0);
        fade.advance(TICK);
        fade.advance(TICK);
        assert_eq!(fade.current(), 0.0);
        assert!(fade.is_settled());
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut fade = FadeState::DARK;
        fade.retarget(1.0, Duration::from_millis(0));
        assert_eq!(fade.current(), 0.0);

        fade.advance(TICK);
        assert_eq!(fade.current(), 1.0);
        assert!(fade.is_settled());
    }

    #[test]
    fn test_retarget_mid_fade_reverses() {
        let mut fade = FadeState::DARK;
        fade.retarget(1.0, Duration::from_millis(500));
        for _ in 0..4 {
            fade.advance(TICK);
        }
        let peak = fade.current();
        assert!(peak > 0.0 && peak < 1.0);

        fade.retarget(0.0, Duration::from_millis(500));
        fade.advance(TICK);
        assert!(fade.current() < peak);
    }

    #[test]
    fn test_targets_are_clamped() {
        let mut fade = FadeState::DARK;
        fade.retarget(3.0, Duration::from_millis(0));
        assert_eq!(fade.target(), 1.0);

        fade.snap(-1.0);
        assert_eq!(fade.current(), 0.0);
        assert_eq!(fade.target(), 0.0);
    }

    #[test]
    fn test_new_clamps_brightness() {
        let bright = FadeState::new(2.0);
        assert_eq!(bright.current(), 1.0);
        assert_eq!(bright.target(), 1.0);
        assert!(bright.is_settled());

        assert_eq!(FadeState::new(-1.0).current(), 0.0);
        assert_eq!(FadeState::new(0.4).current(), 0.4);
    }
}
