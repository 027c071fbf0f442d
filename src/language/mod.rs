//! Clock face languages
//!
//! Each language is a static phrasebook: fixed word to LED tables for its
//! matrix plus the rules that turn an hour and minute into words.

mod english_uk;
mod french;

pub use english_uk::EnglishUk;
pub use french::French;

use crate::word_mask::{PhraseTime, WordMask};

const LANGUAGE_NAME_FRENCH: &str = "Francais";
const LANGUAGE_NAME_ENGLISH_UK: &str = "English UK";

const LANGUAGE_CODE_FRENCH: &str = "fr";
const LANGUAGE_CODE_ENGLISH_UK: &str = "en_uk";

/// Word tables and phrase rules for one clock face
pub trait Phrasebook: Sync {
    /// Append the words spelling `time` to the mask, in reading order
    fn compose(&self, time: PhraseTime, mask: &mut WordMask);

    /// Display name
    fn name(&self) -> &'static str;

    /// Short language code
    fn code(&self) -> &'static str;
}

/// Known face languages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Language {
    #[default]
    French = 0,
    EnglishUk = 1,
}

impl Language {
    /// Select option names, in index order
    pub const OPTIONS: [&'static str; 2] = [LANGUAGE_NAME_FRENCH, LANGUAGE_NAME_ENGLISH_UK];

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::French,
            1 => Self::EnglishUk,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::French => LANGUAGE_NAME_FRENCH,
            Self::EnglishUk => LANGUAGE_NAME_ENGLISH_UK,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::French => LANGUAGE_CODE_FRENCH,
            Self::EnglishUk => LANGUAGE_CODE_ENGLISH_UK,
        }
    }

    /// Parse an option name or a language code
    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            LANGUAGE_NAME_FRENCH | LANGUAGE_CODE_FRENCH => Some(Self::French),
            LANGUAGE_NAME_ENGLISH_UK | LANGUAGE_CODE_ENGLISH_UK => Some(Self::EnglishUk),
            _ => None,
        }
    }

    pub fn phrasebook(self) -> &'static dyn Phrasebook {
        match self {
            Self::French => &French,
            Self::EnglishUk => &EnglishUk,
        }
    }
}
