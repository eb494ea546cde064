//! Per-channel median of a pixel window.

use crate::color::Rgb;

/// Lower median: for an even count the smaller of the two middle values.
///
/// Sorts `values` in place. Returns 0 for an empty slice.
pub fn median_u8(values: &mut [u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    values[(values.len() - 1) / 2]
}

/// Channel-wise median of `pixels`. Each channel is taken independently, so
/// the result need not be one of the inputs.
pub fn median_rgb(pixels: impl IntoIterator<Item = Rgb>) -> Rgb {
    let (mut r, mut g, mut b) = (Vec::new(), Vec::new(), Vec::new());
    for p in pixels {
        r.push(p.r);
        g.push(p.g);
        b.push(p.b);
    }
    Rgb::new(median_u8(&mut r), median_u8(&mut g), median_u8(&mut b))
}
