//! Time to LED mapping
//!
//! [`word_mask`] is a pure function of the time sample and the selectors. It
//! yields the LEDs to light, tagged with the layer that owns them, in the
//! order the phrase is read.

use heapless::Vec;

use crate::clock::TimeSample;
use crate::language::Language;
use crate::layer::LightLayer;

/// Upper bound on lit LEDs for any phrase plus a full seconds ring
pub const MASK_CAPACITY: usize = 128;

/// Second with no ring LED at the bottom of the face
pub const SECONDS_RING_GAP: u8 = 30;

/// Seconds ring LED per second. Seconds 0 and 30 fall on the frame gaps.
const SECONDS_RING: [Option<u16>; 60] = {
    const RING: [u16; 60] = [
        0, 8, 7, 6, 5, 4, 3, 2, 1, 30, //
        33, 62, 65, 94, 97, 126, 129, 158, 161, 190, //
        193, 222, 225, 254, 253, 252, 251, 250, 249, 248, //
        0, 247, 246, 245, 244, 243, 242, 241, 240, 239, //
        208, 207, 176, 175, 144, 143, 112, 111, 80, 79, //
        48, 47, 16, 15, 14, 13, 12, 11, 10, 9,
    ];
    let mut ring = [None; 60];
    let mut second = 0;
    while second < 60 {
        if second != 0 && second != SECONDS_RING_GAP as usize {
            ring[second] = Some(RING[second]);
        }
        second += 1;
    }
    ring
};

const SECONDS_MODE_NAME_CURRENT: &str = "Current second";
const SECONDS_MODE_NAME_PASSED: &str = "Seconds passed";
const SECONDS_MODE_NAME_INVERTED: &str = "Inverted";

/// How the seconds ring is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SecondsMode {
    /// Only the current second
    #[default]
    Current = 0,
    /// Every second of the minute so far
    Passed = 1,
    /// Every second except the current one
    Inverted = 2,
}

impl SecondsMode {
    /// Select option names, in index order
    pub const OPTIONS: [&'static str; 3] = [
        SECONDS_MODE_NAME_CURRENT,
        SECONDS_MODE_NAME_PASSED,
        SECONDS_MODE_NAME_INVERTED,
    ];

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::Current,
            1 => Self::Passed,
            2 => Self::Inverted,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => SECONDS_MODE_NAME_CURRENT,
            Self::Passed => SECONDS_MODE_NAME_PASSED,
            Self::Inverted => SECONDS_MODE_NAME_INVERTED,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            SECONDS_MODE_NAME_CURRENT => Some(Self::Current),
            SECONDS_MODE_NAME_PASSED => Some(Self::Passed),
            SECONDS_MODE_NAME_INVERTED => Some(Self::Inverted),
            _ => None,
        }
    }
}

/// How minutes are spelled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MinutePrecision {
    /// Nearest five minutes, "ten past", "quarter to"
    #[default]
    Rounded,
    /// Exact minute using the per-minute words of the matrix
    Exact,
}

/// Hour and minute actually spoken by the phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseTime {
    /// 0-23
    pub hour: u8,
    /// 0-59, a multiple of five when rounded
    pub minute: u8,
}

/// Nearest five-minute bucket, rounding half down (2 -> 0, 3 -> 5).
///
/// Returns 60 for minutes 58 and 59.
pub const fn phrase_bucket(minute: u8) -> u8 {
    (minute + 2) / 5 * 5
}

/// Hour and minute to spell for a sample
pub const fn phrase_time(time: TimeSample, precision: MinutePrecision) -> PhraseTime {
    match precision {
        MinutePrecision::Exact => PhraseTime {
            hour: time.hour(),
            minute: time.minute(),
        },
        MinutePrecision::Rounded => {
            let bucket = phrase_bucket(time.minute());
            if bucket == 60 {
                PhraseTime {
                    hour: (time.hour() + 1) % 24,
                    minute: 0,
                }
            } else {
                PhraseTime {
                    hour: time.hour(),
                    minute: bucket,
                }
            }
        }
    }
}

/// Ring LED for a second, `None` for the gaps at 0 and 30
pub const fn second_led(second: u8) -> Option<u16> {
    if second >= 60 {
        return None;
    }
    SECONDS_RING[second as usize]
}

/// One lit LED and the layer that claims it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LitLed {
    pub layer: LightLayer,
    pub index: u16,
}

/// Ordered set of lit LEDs for one time value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordMask {
    leds: Vec<LitLed, MASK_CAPACITY>,
    overflow: usize,
}

impl WordMask {
    pub const fn new() -> Self {
        Self {
            leds: Vec::new(),
            overflow: 0,
        }
    }

    /// Append every LED of a word
    pub fn push_word(&mut self, layer: LightLayer, leds: &[u16]) {
        for &index in leds {
            if self.leds.push(LitLed { layer, index }).is_err() {
                self.overflow += 1;
            }
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LitLed> {
        self.leds.iter()
    }

    /// LED indices claimed by one layer, in order
    pub fn layer(&self, layer: LightLayer) -> impl Iterator<Item = u16> + '_ {
        self.leds
            .iter()
            .filter(move |led| led.layer == layer)
            .map(|led| led.index)
    }

    pub fn contains(&self, layer: LightLayer, index: u16) -> bool {
        self.leds
            .iter()
            .any(|led| led.layer == layer && led.index == index)
    }

    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    /// LEDs that did not fit the mask capacity
    pub const fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn clear(&mut self) {
        self.leds.clear();
        self.overflow = 0;
    }
}

/// Compute the lit LEDs for a time.
///
/// Identical inputs always yield an identical mask.
pub fn word_mask(
    time: TimeSample,
    language: Language,
    seconds_mode: SecondsMode,
    precision: MinutePrecision,
) -> WordMask {
    let mut mask = WordMask::new();
    language
        .phrasebook()
        .compose(phrase_time(time, precision), &mut mask);
    push_seconds(&mut mask, time.second(), seconds_mode);
    mask
}

fn push_seconds(mask: &mut WordMask, second: u8, mode: SecondsMode) {
    let mut push = |s: u8| {
        if let Some(index) = second_led(s) {
            mask.push_word(LightLayer::Seconds, &[index]);
        }
    };
    match mode {
        SecondsMode::Current => push(second),
        SecondsMode::Passed => (1..=second).for_each(&mut push),
        SecondsMode::Inverted => (1..60).filter(|&s| s != second).for_each(&mut push),
    }
}
