use super::{LANGUAGE_CODE_FRENCH, LANGUAGE_NAME_FRENCH, Phrasebook};
use crate::layer::LightLayer;
use crate::word_mask::{PhraseTime, WordMask};

const IL: &[u16] = &[17, 18];
const EST: &[u16] = &[20, 21, 22];

const MINUIT: &[u16] = &[24, 25, 26, 27, 28, 29];
const MIDI: &[u16] = &[84, 85, 86, 87];
const HEURE: &[u16] = &[88, 89, 90, 91, 92];
const HEURE_PLURAL: &[u16] = &[93];

/// Hour words, indexed by 12-hour value (0 unused)
const HOURS: [&[u16]; 12] = [
    &[],
    &[46, 45, 44],
    &[58, 59, 60, 61],
    &[40, 39, 38, 37, 36],
    &[52, 53, 54, 55, 56, 57],
    &[49, 50, 51, 52],
    &[36, 35, 34],
    &[43, 42, 41, 40],
    &[78, 77, 76, 75],
    &[74, 73, 72, 71],
    &[81, 82, 83],
    &[69, 68, 67, 66],
];

const ET: &[u16] = &[110, 109];
const MOINS: &[u16] = &[108, 107, 106, 105, 104];
const LE: &[u16] = &[114, 115];
const QUART: &[u16] = &[121, 122, 123, 124, 125];
const DEMIE: &[u16] = &[153, 154, 155, 156, 157];
/// "et" joining tens and "un" (vingt-et-un)
const ET_UN: &[u16] = &[209, 210];

/// Minute number words, indexed by value. Empty where the face has no word.
const MINUTES: [&[u16]; 51] = {
    let mut words: [&[u16]; 51] = [&[]; 51];
    words[1] = &[212, 213, 214];
    words[2] = &[197, 196, 195, 194];
    words[3] = &[185, 186, 187, 188, 189];
    words[4] = &[206, 205, 204, 203, 202, 201];
    words[5] = &[142, 141, 140, 139];
    words[6] = &[228, 227, 226];
    words[7] = &[217, 218, 219, 220];
    words[8] = &[237, 236, 235, 234];
    words[9] = &[232, 231, 230, 229];
    words[10] = &[174, 173, 172];
    words[11] = &[133, 132, 131, 130];
    words[12] = &[166, 165, 164, 163, 162];
    words[13] = &[203, 202, 201, 200, 199, 198];
    words[14] = &[177, 178, 179, 180, 181, 182, 183, 184];
    words[16] = &[171, 170, 169, 168, 167];
    words[20] = &[116, 117, 118, 119, 120];
    words[30] = &[103, 102, 101, 100, 99, 98];
    words[40] = &[145, 146, 147, 148, 149, 150, 151, 152];
    words[50] = &[142, 141, 140, 139, 138, 137, 136, 135, 134];
    words
};

/// French face: "IL EST <heure> [MOINS|ET] <minutes>"
#[derive(Debug, Clone, Copy, Default)]
pub struct French;

impl French {
    fn minutes(mask: &mut WordMask, minute: u8) {
        mask.push_word(LightLayer::Minutes, MINUTES[usize::from(minute)]);
    }
}

impl Phrasebook for French {
    fn compose(&self, time: PhraseTime, mask: &mut WordMask) {
        mask.push_word(LightLayer::Hours, IL);
        mask.push_word(LightLayer::Hours, EST);

        // "moins" only on five-minute marks, later minutes count up
        let minute = time.minute;
        let use_moins = minute > 30 && minute % 5 == 0;
        let hour = if use_moins {
            (time.hour + 1) % 24
        } else {
            time.hour
        };

        match hour {
            0 => mask.push_word(LightLayer::Hours, MINUIT),
            12 => mask.push_word(LightLayer::Hours, MIDI),
            _ => {
                let hour12 = hour % 12;
                mask.push_word(LightLayer::Hours, HOURS[usize::from(hour12)]);
                mask.push_word(LightLayer::Hours, HEURE);
                if hour12 > 1 {
                    mask.push_word(LightLayer::Hours, HEURE_PLURAL);
                }
            }
        }

        if use_moins {
            mask.push_word(LightLayer::Minutes, MOINS);
            match minute {
                45 => {
                    mask.push_word(LightLayer::Minutes, LE);
                    mask.push_word(LightLayer::Minutes, QUART);
                }
                35 => {
                    Self::minutes(mask, 20);
                    Self::minutes(mask, 5);
                }
                40 => Self::minutes(mask, 20),
                50 => Self::minutes(mask, 10),
                _ => Self::minutes(mask, 5),
            }
        } else if minute == 30 {
            mask.push_word(LightLayer::Minutes, ET);
            mask.push_word(LightLayer::Minutes, DEMIE);
        } else if minute == 15 {
            mask.push_word(LightLayer::Minutes, ET);
            mask.push_word(LightLayer::Minutes, QUART);
        } else if minute > 0 {
            if minute % 10 == 0 || minute <= 16 {
                Self::minutes(mask, minute);
            } else {
                let unit = minute % 10;
                Self::minutes(mask, minute - unit);
                if unit == 1 {
                    mask.push_word(LightLayer::Minutes, ET_UN);
                }
                Self::minutes(mask, unit);
            }
        }
    }

    fn name(&self) -> &'static str {
        LANGUAGE_NAME_FRENCH
    }

    fn code(&self) -> &'static str {
        LANGUAGE_CODE_FRENCH
    }
}
