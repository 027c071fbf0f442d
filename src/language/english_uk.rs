use super::{LANGUAGE_CODE_ENGLISH_UK, LANGUAGE_NAME_ENGLISH_UK, Phrasebook};
use crate::layer::LightLayer;
use crate::word_mask::{PhraseTime, WordMask};

const IT: &[u16] = &[17, 18];
const IS: &[u16] = &[20, 21];

/// Hour words, indexed by 12-hour value (0 unused)
const HOURS: [&[u16]; 12] = [
    &[],
    &[196, 195, 194],
    &[198, 197, 196],
    &[174, 173, 172, 171, 170],
    &[169, 168, 167, 166],
    &[165, 164, 163, 162],
    &[178, 179, 180],
    &[182, 183, 184, 185, 186],
    &[202, 201, 200, 199, 198],
    &[205, 204, 203, 202],
    &[217, 218, 219],
    &[238, 237, 236, 235, 234, 233],
];
const NOON: &[u16] = &[186, 187, 188, 189];
const MIDNIGHT: &[u16] = &[210, 211, 212, 213, 214, 215, 216, 217];
const OCLOCK: &[u16] = &[231, 230, 229, 228, 227, 226];

/// Minute number words, indexed by value. Empty where the face has no word.
const MINUTES: [&[u16]; 21] = [
    &[],
    &[43, 42, 41],
    &[45, 44, 43],
    &[39, 38, 37, 36, 35],
    &[50, 51, 52, 53],
    &[110, 109, 108, 107],
    &[54, 55, 56],
    &[77, 76, 75, 74, 73],
    &[82, 83, 84, 85, 86],
    &[73, 72, 71, 70],
    &[106, 105, 104],
    &[103, 102, 101, 100, 99, 98],
    &[114, 115, 116, 117, 118, 119],
    &[86, 87, 88, 89, 90, 91, 92, 93],
    &[50, 51, 52, 53, 57, 58, 59, 60],
    &[],
    &[54, 55, 56, 57, 58, 59, 60],
    &[77, 76, 75, 74, 73, 69, 68, 67, 66],
    &[82, 83, 84, 85, 86, 90, 91, 92, 93],
    &[73, 72, 71, 70, 69, 68, 67, 66],
    &[23, 24, 25, 26, 27, 28],
];
const HALF: &[u16] = &[121, 122, 123, 124];
const QUARTER: &[u16] = &[137, 136, 135, 134, 133, 132, 131];
const MINUTE: &[u16] = &[145, 146, 147, 148, 149, 150];
const MINUTE_PLURAL: &[u16] = &[145, 146, 147, 148, 149, 150, 151];
const PAST: &[u16] = &[153, 154, 155, 156];
const TO: &[u16] = &[156, 157];

/// English face: "IT IS [<minutes> PAST|TO] <hour> [O'CLOCK]"
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishUk;

impl EnglishUk {
    fn hour(mask: &mut WordMask, hour: u8) {
        let word = match hour {
            0 => MIDNIGHT,
            12 => NOON,
            _ => HOURS[usize::from(hour % 12)],
        };
        mask.push_word(LightLayer::Hours, word);
    }

    fn number(mask: &mut WordMask, minute: u8) {
        mask.push_word(LightLayer::Minutes, MINUTES[usize::from(minute)]);
    }

    fn minutes(mask: &mut WordMask, minute: u8) {
        match minute {
            15 => mask.push_word(LightLayer::Minutes, QUARTER),
            30 => mask.push_word(LightLayer::Minutes, HALF),
            5 | 10 | 20 => Self::number(mask, minute),
            25 => {
                Self::number(mask, 20);
                Self::number(mask, 5);
            }
            1 => {
                Self::number(mask, 1);
                mask.push_word(LightLayer::Minutes, MINUTE);
            }
            2..=19 => {
                Self::number(mask, minute);
                mask.push_word(LightLayer::Minutes, MINUTE_PLURAL);
            }
            21..=29 => {
                Self::number(mask, 20);
                Self::number(mask, minute % 10);
                mask.push_word(LightLayer::Minutes, MINUTE_PLURAL);
            }
            _ => {}
        }
    }
}

impl Phrasebook for EnglishUk {
    fn compose(&self, time: PhraseTime, mask: &mut WordMask) {
        mask.push_word(LightLayer::Hours, IT);
        mask.push_word(LightLayer::Hours, IS);

        if time.minute == 0 {
            Self::hour(mask, time.hour);
            if time.hour % 12 != 0 {
                mask.push_word(LightLayer::Hours, OCLOCK);
            }
            return;
        }

        let use_to = time.minute > 30;
        if use_to {
            Self::minutes(mask, 60 - time.minute);
            mask.push_word(LightLayer::Minutes, TO);
            Self::hour(mask, (time.hour + 1) % 24);
        } else {
            Self::minutes(mask, time.minute);
            mask.push_word(LightLayer::Minutes, PAST);
            Self::hour(mask, time.hour);
        }
    }

    fn name(&self) -> &'static str {
        LANGUAGE_NAME_ENGLISH_UK
    }

    fn code(&self) -> &'static str {
        LANGUAGE_CODE_ENGLISH_UK
    }
}
