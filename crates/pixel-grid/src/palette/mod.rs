//! Bead palettes and nearest-color matching
//!
//! [`BeadPalette`] holds the ordered, validated bead table; [`ColorMatcher`]
//! maps arbitrary colors onto it.

mod bead_palette;
mod error;
mod matcher;

pub use bead_palette::{BeadPalette, PaletteEntry};
pub use error::{InvalidColorFormat, MatchError, PaletteError, UnknownMethod};
pub use matcher::{ColorMatch, ColorMatcher, DistanceMethod, SATURATION_PENALTY_WEIGHT};
