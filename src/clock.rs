//! Wall-clock input
//!
//! The engine never reads a hardware clock itself. A [`ClockSource`] is polled
//! once per tick and yields a validated [`TimeSample`].

/// A validated wall-clock reading.
///
/// Fields are always in range: hour 0-23, minute 0-59, second 0-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSample {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeSample {
    /// Midnight, used as the initial held sample.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Create a sample, returning `None` if any field is out of range.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            second,
        })
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    pub const fn second(self) -> u8 {
        self.second
    }
}

impl Default for TimeSample {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

/// Source of the current local time.
///
/// Implement this for an SNTP client, an RTC chip or a test fake.
pub trait ClockSource {
    /// Returns true once the clock holds a trustworthy time.
    fn is_synchronized(&self) -> bool;

    /// Current local time. Only meaningful while synchronized.
    fn current_time(&self) -> TimeSample;

    /// Sample the clock, yielding `None` while unsynchronized.
    fn sample(&self) -> Option<TimeSample> {
        self.is_synchronized().then(|| self.current_time())
    }
}
