//! Tick scheduling and timing utilities.
//!
//! Provides portable tick pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between ticks.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock::ClockSource;
use crate::error::StripError;
use crate::renderer::{Renderer, TickStatus};
use crate::LedStrip;

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// What the renderer did, or the strip error if `show()` failed.
    pub status: Result<TickStatus, StripError>,
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable tick scheduler that polls the clock and drives the renderer.
///
/// This scheduler:
/// - Tracks tick timing with drift correction
/// - Samples the clock source once per tick
/// - Calls the renderer and writes the frame to the strip
/// - Returns timing info so the caller can sleep appropriately
///
/// Ticks are paced at [`Renderer::tick_interval`], the same step fades and
/// effect phases advance by.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(renderer, clock, strip);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct TickScheduler<
    'a,
    C: ClockSource,
    S: LedStrip,
    const MAX_LEDS: usize,
    const INTENT_CHANNEL_SIZE: usize,
> {
    clock: C,
    strip: S,
    renderer: Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE>,
    next_tick: Instant,
    tick_interval: Duration,
    last_second: Option<u8>,
}

impl<'a, C: ClockSource, S: LedStrip, const MAX_LEDS: usize, const INTENT_CHANNEL_SIZE: usize>
    TickScheduler<'a, C, S, MAX_LEDS, INTENT_CHANNEL_SIZE>
{
    /// Create a new tick scheduler paced by the renderer's tick interval.
    pub fn new(renderer: Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE>, clock: C, strip: S) -> Self {
        Self {
            clock,
            strip,
            next_tick: Instant::from_millis(0),
            tick_interval: renderer.tick_interval(),
            renderer,
            last_second: None,
        }
    }

    /// Process one tick and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Samples the clock and renders the frame
    /// 3. Writes to the strip
    /// 4. Returns the deadline for the next tick
    ///
    /// A strip failure is reported in [`TickResult::status`]; the schedule
    /// continues regardless and the next tick retries the write.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Skip the backlog after a long stall instead of bursting
        let max_drift = self.tick_interval.as_millis() * 2;
        if now.as_millis() > self.next_tick.as_millis() + max_drift {
            self.next_tick = now;
        }

        let sample = self.clock.sample();
        let status = self.renderer.tick(sample, &mut self.strip);
        self.log_status(sample.map(|s| s.second()), &status);

        self.next_tick += self.tick_interval;

        let sleep_duration = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            status,
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    /// Once per second, report the frame status
    fn log_status(&mut self, second: Option<u8>, _status: &Result<TickStatus, StripError>) {
        if second == self.last_second {
            return;
        }
        self.last_second = second;
        #[cfg(feature = "esp32-log")]
        {
            let stats = self.renderer.stats();
            println!(
                "[TickScheduler.tick] {:?} lit={} dropped={} power={}mW",
                _status, stats.lit, stats.dropped, stats.power_mw
            );
        }
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE> {
        &self.renderer
    }

    /// Get a mutable reference to the renderer.
    pub fn renderer_mut(&mut self) -> &mut Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE> {
        &mut self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }
}
