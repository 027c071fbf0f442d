use libm::{floorf, fmodf};
use smart_leds::{RGB8, hsv::Hsv as HSV};

use crate::math8::{blend8, scale8, unit8};

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Create a palette from a list of hex colors (0xRRGGBB format)
macro_rules! hex_palette {
    ($($color:expr),* $(,)?) => {
        [
            $($crate::color::rgb_from_u32($color)),*
        ]
    };
}
pub(crate) use hex_palette;

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Scale every channel by a unit factor (0.0-1.0)
#[inline]
pub fn scale_color(color: Rgb, factor: f32) -> Rgb {
    let scale = unit8(factor);
    if scale == 255 {
        return color;
    }
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Convert a floating-point HSV color to RGB.
///
/// `hue` wraps into 0.0-1.0, `sat` and `val` are clamped to 0.0-1.0.
/// The 8-bit `smart_leds::hsv::hsv2rgb` quantizes hue to 256 steps, which is
/// too coarse for the slow rainbow on a 256-LED face.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hue: f32, sat: f32, val: f32) -> Rgb {
    let hue = fmodf(hue, 1.0);
    let hue = if hue < 0.0 { hue + 1.0 } else { hue };
    let sat = sat.clamp(0.0, 1.0);
    let val = val.clamp(0.0, 1.0);

    let sector = hue * 6.0;
    let index = floorf(sector);
    let frac = sector - index;
    let p = val * (1.0 - sat);
    let q = val * (1.0 - sat * frac);
    let t = val * (1.0 - sat * (1.0 - frac));

    let (r, g, b) = match index as u8 % 6 {
        0 => (val, t, p),
        1 => (q, val, p),
        2 => (p, val, t),
        3 => (p, q, val),
        4 => (t, p, val),
        _ => (val, p, q),
    };

    Rgb {
        r: unit8(r),
        g: unit8(g),
        b: unit8(b),
    }
}
