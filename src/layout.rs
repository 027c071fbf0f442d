use crate::error::ConfigError;

/// LEDs on a 16x16 serpentine matrix that sit behind the frame corners and
/// row ends and are never lit.
pub const DEFAULT_EXCLUDED: [u16; 16] = [
    0, 31, 32, 63, 64, 95, 96, 127, 128, 159, 160, 191, 192, 223, 224, 255,
];

/// Number of LEDs on the default 16x16 matrix
pub const DEFAULT_NUM_LEDS: u16 = 256;

/// Physical layout of the LED strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedLayout {
    /// Number of LEDs on the strip
    pub num_leds: u16,
    /// LEDs that must stay dark
    pub excluded: &'static [u16],
}

impl LedLayout {
    pub const fn new(num_leds: u16, excluded: &'static [u16]) -> Self {
        Self { num_leds, excluded }
    }

    /// Get the number of LEDs as a usize
    pub const fn count(self) -> usize {
        self.num_leds as usize
    }

    /// Returns true if the index exists on the strip
    pub const fn contains(self, index: u16) -> bool {
        index < self.num_leds
    }

    /// Returns true if the index exists and may be lit
    pub fn is_drawable(self, index: u16) -> bool {
        self.contains(index) && !self.excluded.contains(&index)
    }

    /// Check that the layout fits a frame buffer of `max_leds` pixels
    pub const fn validate(self, max_leds: usize) -> Result<(), ConfigError> {
        if self.num_leds as usize > max_leds {
            return Err(ConfigError::TooManyLeds);
        }
        Ok(())
    }
}

impl Default for LedLayout {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_LEDS, &DEFAULT_EXCLUDED)
    }
}
