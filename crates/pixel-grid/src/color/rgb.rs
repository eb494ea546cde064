//! 8-bit RGB color type
//!
//! `Rgb` is the pixel type of every image and grid in this crate, and the
//! parsed form of every hex color string exchanged with callers.

use std::fmt;
use std::str::FromStr;

use crate::palette::InvalidColorFormat;

/// Channel spread below which a color counts as neutral (grey-like).
pub const NEUTRAL_SPREAD_THRESHOLD: u8 = 30;

/// A color as three 8-bit sRGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as a byte array `[R, G, B]`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as `#rrggbb` (lowercase, zero-padded).
    ///
    /// # Example
    /// ```
    /// use pixel_grid::Rgb;
    /// assert_eq!(Rgb::new(255, 8, 0).to_hex(), "#ff0800");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Difference between the largest and the smallest channel.
    #[inline]
    pub fn channel_spread(self) -> u8 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        max - min
    }

    /// True when the channels are close enough to read as grey.
    #[inline]
    pub fn is_neutral(self) -> bool {
        self.channel_spread() < NEUTRAL_SPREAD_THRESHOLD
    }

    /// HSV saturation in `0.0..=1.0`: `(max - min) / max`, zero for black.
    pub fn saturation(self) -> f64 {
        let max = self.r.max(self.g).max(self.b);
        if max == 0 {
            return 0.0;
        }
        f64::from(self.channel_spread()) / f64::from(max)
    }

    /// Simple channel average, used as a cheap grayscale reduction.
    #[inline]
    pub fn gray(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }

    /// Euclidean distance between two colors in RGB space.
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = InvalidColorFormat;

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    ///
    /// Only the exact six-digit form is accepted: no shorthand, no
    /// surrounding whitespace, no sign characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixel_grid::Rgb;
    ///
    /// let red: Rgb = "#FF0000".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// assert!("#F00".parse::<Rgb>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidColorFormat::new(s));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| InvalidColorFormat::new(s))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}
