//! Process color arithmetic (KCMY, CMY, RGB)
//!
//! All conversions work on `u8` channels with intermediate `u32` math and
//! explicit saturation, so no step can wrap or exceed 255.

use std::fmt;

/// Remove black from one chroma channel.
///
/// `255 - round((255 - k) * (255 - channel) / 255)`. The product is odd
/// over an odd divisor, so there is never an exact half to round.
pub fn remove_k(k: u8, channel: u8) -> u8 {
    let product = (255 - k as u32) * (255 - channel as u32);
    let scaled = (product + 127) / 255;
    (255 - scaled.min(255)) as u8
}

/// Scale a channel by a weight in `0..=255`, rounding to nearest.
fn scale_channel(value: u8, weight: u8) -> u8 {
    let scaled = (value as u32 * weight as u32 + 127) / 255;
    scaled.min(255) as u8
}

/// A process color as stored by MapGIS: black first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Kcmy {
    pub k: u8,
    pub c: u8,
    pub m: u8,
    pub y: u8,
}

impl Kcmy {
    pub const fn new(k: u8, c: u8, m: u8, y: u8) -> Self {
        Self { k, c, m, y }
    }

    /// Fold the black component into C/M/Y.
    pub fn remove_black(&self) -> Cmy {
        Cmy {
            c: remove_k(self.k, self.c),
            m: remove_k(self.k, self.m),
            y: remove_k(self.k, self.y),
        }
    }

    /// Scale every channel (black included) by `weight / 255`.
    pub fn scale(&self, weight: u8) -> Kcmy {
        Kcmy {
            k: scale_channel(self.k, weight),
            c: scale_channel(self.c, weight),
            m: scale_channel(self.m, weight),
            y: scale_channel(self.y, weight),
        }
    }
}

/// A black-free process color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cmy {
    pub c: u8,
    pub m: u8,
    pub y: u8,
}

impl Cmy {
    pub const fn new(c: u8, m: u8, y: u8) -> Self {
        Self { c, m, y }
    }

    /// Additive ink blend, clamped at 255 per channel.
    pub fn saturating_add(self, other: Cmy) -> Cmy {
        Cmy {
            c: self.c.saturating_add(other.c),
            m: self.m.saturating_add(other.m),
            y: self.y.saturating_add(other.y),
        }
    }

    pub fn to_rgb(self) -> Rgb {
        Rgb {
            r: 255 - self.c,
            g: 255 - self.m,
            b: 255 - self.y,
        }
    }
}

/// Screen color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
