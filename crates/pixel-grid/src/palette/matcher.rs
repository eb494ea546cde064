//! Nearest-bead matching with a neutrality penalty.

use std::fmt;
use std::str::FromStr;

use super::bead_palette::{BeadPalette, PaletteEntry};
use super::error::{InvalidColorFormat, MatchError, UnknownMethod};
use crate::color::{Lab, Rgb};

/// Weight applied to a candidate's saturation when the query is neutral.
pub const SATURATION_PENALTY_WEIGHT: f64 = 50.0;

/// Color space in which match distances are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMethod {
    /// CIE76 Delta E
    #[default]
    Lab,
    /// Euclidean distance on 8-bit channels
    Rgb,
}

impl DistanceMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMethod::Lab => "lab",
            DistanceMethod::Rgb => "rgb",
        }
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lab" => Ok(DistanceMethod::Lab),
            "rgb" => Ok(DistanceMethod::Rgb),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// The bead chosen for one query color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMatch {
    /// The query color, normalized to `#rrggbb`
    pub source_color: String,
    pub matched_id: String,
    pub matched_hex: String,
    pub matched_name: String,
    /// Penalized distance that won the search
    pub distance: f64,
}

/// A candidate bead with everything the search needs precomputed.
struct Candidate<'a> {
    entry: &'a PaletteEntry,
    rgb: Rgb,
    lab: Lab,
    saturation: f64,
}

/// Matches arbitrary colors to the closest entry of a bead palette.
///
/// For each query color the matcher scans the candidates in palette order
/// and keeps the first one with the smallest distance. When the query is
/// neutral (grey-like), each candidate's distance is increased by
/// `saturation × 50` so grey pixels prefer grey beads over colorful ones
/// that happen to be slightly closer.
///
/// # Example
///
/// ```
/// use pixel_grid::{BeadPalette, ColorMatcher, DistanceMethod, PaletteEntry};
///
/// let palette = BeadPalette::new(vec![
///     PaletteEntry::new("P05", "#BF0A1E", "Red"),
///     PaletteEntry::new("P17", "#8A8D91", "Grey"),
/// ])
/// .unwrap();
///
/// let matcher = ColorMatcher::new(DistanceMethod::Lab);
/// let results = matcher.match_colors(&["#808080", "#C00020"], &palette, None).unwrap();
/// assert_eq!(results[0].as_ref().unwrap().matched_id, "P17");
/// assert_eq!(results[1].as_ref().unwrap().matched_id, "P05");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorMatcher {
    method: DistanceMethod,
}

impl ColorMatcher {
    pub fn new(method: DistanceMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> DistanceMethod {
        self.method
    }

    /// Match every query color against the palette.
    ///
    /// If `candidate_ids` is given and non-empty, only entries whose id is in
    /// that set take part. The result has one element per query color, in
    /// query order; a malformed query color yields an `Err` in its slot and
    /// does not affect the others.
    ///
    /// # Errors
    ///
    /// [`MatchError::NoCandidates`] if the (restricted) palette is empty.
    pub fn match_colors<S: AsRef<str>>(
        &self,
        colors: &[S],
        palette: &BeadPalette,
        candidate_ids: Option<&[S]>,
    ) -> Result<Vec<Result<ColorMatch, InvalidColorFormat>>, MatchError> {
        let candidates = candidates(palette, candidate_ids);
        if candidates.is_empty() {
            return Err(MatchError::NoCandidates);
        }

        Ok(colors
            .iter()
            .map(|color| {
                let rgb: Rgb = color.as_ref().parse()?;
                Ok(self.best_match(rgb, &candidates))
            })
            .collect())
    }

    /// Match a single already-parsed color.
    ///
    /// # Errors
    ///
    /// [`MatchError::NoCandidates`] if the palette is empty.
    pub fn match_rgb(&self, color: Rgb, palette: &BeadPalette) -> Result<ColorMatch, MatchError> {
        let candidates = candidates::<&str>(palette, None);
        if candidates.is_empty() {
            return Err(MatchError::NoCandidates);
        }
        Ok(self.best_match(color, &candidates))
    }

    /// Match many already-parsed colors, preparing the palette only once.
    ///
    /// Results are in input order.
    ///
    /// # Errors
    ///
    /// [`MatchError::NoCandidates`] if the palette is empty.
    pub fn match_all_rgb<I>(
        &self,
        colors: I,
        palette: &BeadPalette,
    ) -> Result<Vec<ColorMatch>, MatchError>
    where
        I: IntoIterator<Item = Rgb>,
    {
        let candidates = candidates::<&str>(palette, None);
        if candidates.is_empty() {
            return Err(MatchError::NoCandidates);
        }
        Ok(colors
            .into_iter()
            .map(|color| self.best_match(color, &candidates))
            .collect())
    }

    fn best_match(&self, query: Rgb, candidates: &[Candidate<'_>]) -> ColorMatch {
        let query_lab = Lab::from(query);
        let neutral = query.is_neutral();

        let mut best = &candidates[0];
        let mut best_distance = f64::INFINITY;

        for candidate in candidates {
            let mut distance = match self.method {
                DistanceMethod::Lab => query_lab.distance(candidate.lab),
                DistanceMethod::Rgb => query.distance(candidate.rgb),
            };
            if neutral {
                distance += candidate.saturation * SATURATION_PENALTY_WEIGHT;
            }
            // Strict comparison keeps the first candidate on ties.
            if distance < best_distance {
                best_distance = distance;
                best = candidate;
            }
        }

        ColorMatch {
            source_color: query.to_hex(),
            matched_id: best.entry.id.clone(),
            matched_hex: best.entry.hex.clone(),
            matched_name: best.entry.name.clone(),
            distance: best_distance,
        }
    }
}

fn candidates<'a, S: AsRef<str>>(
    palette: &'a BeadPalette,
    candidate_ids: Option<&[S]>,
) -> Vec<Candidate<'a>> {
    let filter = candidate_ids.filter(|ids| !ids.is_empty());

    palette
        .iter()
        .filter(|(entry, _)| match filter {
            Some(ids) => ids.iter().any(|id| id.as_ref() == entry.id),
            None => true,
        })
        .map(|(entry, rgb)| Candidate {
            entry,
            rgb,
            lab: Lab::from(rgb),
            saturation: rgb.saturation(),
        })
        .collect()
}
