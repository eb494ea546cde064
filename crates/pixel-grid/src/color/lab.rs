//! CIE L*a*b* color space (D65)
//!
//! Conversion chain: sRGB -> linear RGB -> CIE XYZ -> CIE LAB, and the
//! algebraic inverse. Distances in this space are CIE76 Delta E.

use super::rgb::Rgb;

/// D65 reference white.
const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

/// `6/29`, the breakpoint of the LAB companding function.
const DELTA: f64 = 6.0 / 29.0;

/// A color in CIE LAB space.
///
/// - `l`: lightness, 0 (black) to 100 (white)
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIE76 Delta E: Euclidean distance in LAB space.
    pub fn distance(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    /// Convert back to 8-bit sRGB.
    ///
    /// Channels are rounded and clamped to `0..=255`, so out-of-gamut LAB
    /// values land on the nearest representable color and the round trip
    /// through `Lab` is only exact to within one step per channel.
    pub fn to_rgb(self) -> Rgb {
        let (x, y, z) = lab_to_xyz(self);

        let r = x * 3.2404542 + y * -1.5371385 + z * -0.4985314;
        let g = x * -0.9692660 + y * 1.8760108 + z * 0.0415560;
        let b = x * 0.0556434 + y * -0.2040259 + z * 1.0572252;

        Rgb::new(encode_channel(r), encode_channel(g), encode_channel(b))
    }
}

impl From<Rgb> for Lab {
    fn from(rgb: Rgb) -> Self {
        let r = srgb_to_linear(rgb.r);
        let g = srgb_to_linear(rgb.g);
        let b = srgb_to_linear(rgb.b);

        let x = r * 0.4124564 + g * 0.3575761 + b * 0.1804375;
        let y = r * 0.2126729 + g * 0.7151522 + b * 0.0721750;
        let z = r * 0.0193339 + g * 0.1191920 + b * 0.9503041;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

/// Decode one 8-bit sRGB channel to linear light.
#[inline]
fn srgb_to_linear(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

/// Encode linear light to an 8-bit sRGB channel, rounding and clamping.
#[inline]
fn encode_channel(linear: f64) -> u8 {
    let v = if linear > 0.0031308 {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * linear
    };
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

fn lab_to_xyz(lab: Lab) -> (f64, f64, f64) {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    (
        WHITE_X * lab_f_inv(fx),
        WHITE_Y * lab_f_inv(fy),
        WHITE_Z * lab_f_inv(fz),
    )
}
