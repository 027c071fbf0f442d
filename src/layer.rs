//! Light layers of the clock face

const LAYER_ID_HOURS: u8 = 0;
const LAYER_ID_MINUTES: u8 = 1;
const LAYER_ID_SECONDS: u8 = 2;
const LAYER_ID_BACKGROUND: u8 = 3;
const LAYER_ID_WORDS: u8 = 4;

const LAYER_NAME_HOURS: &str = "hours";
const LAYER_NAME_MINUTES: &str = "minutes";
const LAYER_NAME_SECONDS: &str = "seconds";
const LAYER_NAME_BACKGROUND: &str = "background";
const LAYER_NAME_WORDS: &str = "words";

/// Independently controllable light layer.
///
/// `Words` is an overlay for the hour and minute words: while it is on, it
/// takes over every LED those layers light.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LightLayer {
    Hours = LAYER_ID_HOURS,
    Minutes = LAYER_ID_MINUTES,
    Seconds = LAYER_ID_SECONDS,
    Background = LAYER_ID_BACKGROUND,
    Words = LAYER_ID_WORDS,
}

impl LightLayer {
    /// Number of layers
    pub const COUNT: usize = 5;

    /// All layers in index order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Background,
        Self::Words,
    ];

    /// Index into per-layer arrays
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            LAYER_ID_HOURS => Self::Hours,
            LAYER_ID_MINUTES => Self::Minutes,
            LAYER_ID_SECONDS => Self::Seconds,
            LAYER_ID_BACKGROUND => Self::Background,
            LAYER_ID_WORDS => Self::Words,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hours => LAYER_NAME_HOURS,
            Self::Minutes => LAYER_NAME_MINUTES,
            Self::Seconds => LAYER_NAME_SECONDS,
            Self::Background => LAYER_NAME_BACKGROUND,
            Self::Words => LAYER_NAME_WORDS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            LAYER_NAME_HOURS => Some(Self::Hours),
            LAYER_NAME_MINUTES => Some(Self::Minutes),
            LAYER_NAME_SECONDS => Some(Self::Seconds),
            LAYER_NAME_BACKGROUND => Some(Self::Background),
            LAYER_NAME_WORDS => Some(Self::Words),
            _ => None,
        }
    }

    /// Compositing priority, higher wins an LED claimed by several layers.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Background => 0,
            Self::Hours => 1,
            Self::Minutes => 2,
            Self::Seconds => 3,
            Self::Words => 4,
        }
    }

    /// Layers that draw clock words (as opposed to the seconds ring or fill)
    pub const fn is_word(self) -> bool {
        matches!(self, Self::Hours | Self::Minutes | Self::Words)
    }
}
