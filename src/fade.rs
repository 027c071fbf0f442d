//! Per-LED brightness fades
//!
//! A [`FadeState`] moves linearly toward its target by a fixed fraction of
//! full scale per tick. It never overshoots and stays within 0.0-1.0.

use embassy_time::Duration;

/// Linear brightness fade for one LED
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeState {
    current: f32,
    target: f32,
    duration: Duration,
}

impl FadeState {
    /// Fully dark, settled
    pub const DARK: Self = Self {
        current: 0.0,
        target: 0.0,
        duration: Duration::from_millis(0),
    };

    /// Settled fade at a brightness, clamped to 0.0-1.0
    pub fn new(current: f32) -> Self {
        let current = current.clamp(0.0, 1.0);
        Self {
            current,
            target: current,
            duration: Duration::from_millis(0),
        }
    }

    pub const fn current(&self) -> f32 {
        self.current
    }

    pub const fn target(&self) -> f32 {
        self.target
    }

    /// Set a new target and the time a full 0-1 sweep should take.
    ///
    /// A zero duration makes the next [`advance`](Self::advance) jump.
    pub fn retarget(&mut self, target: f32, duration: Duration) {
        self.target = target.clamp(0.0, 1.0);
        self.duration = duration;
    }

    /// Jump immediately to a brightness
    pub fn snap(&mut self, value: f32) {
        let value = value.clamp(0.0, 1.0);
        self.current = value;
        self.target = value;
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Move toward the target by `tick / duration`, clamped to the remaining
    /// distance.
    #[allow(clippy::cast_precision_loss)]
    pub fn advance(&mut self, tick: Duration) {
        if self.is_settled() {
            return;
        }
        let duration_ms = self.duration.as_millis();
        if duration_ms == 0 {
            self.current = self.target;
            return;
        }

        let step = tick.as_millis() as f32 / duration_ms as f32;
        let remaining = self.target - self.current;
        if step >= remaining.abs() {
            self.current = self.target;
        } else if remaining > 0.0 {
            self.current = (self.current + step).min(1.0);
        } else {
            self.current = (self.current - step).max(0.0);
        }
    }
}

impl Default for FadeState {
    fn default() -> Self {
        Self::DARK
    }
}
