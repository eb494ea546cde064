//! Bead shopping list for a logical grid.

use pixel_grid::{BeadPalette, ColorMatcher, MatchError, PixelGrid, Rgb};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// How many beads of one color a pattern needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BeadCount {
    pub id: String,
    pub name: String,
    pub hex: String,
    pub count: usize,
}

/// Match every cell of `grid` to a bead and count beads per color.
///
/// Each distinct cell color is matched once. The list is sorted by count,
/// largest first, then by bead id.
pub fn count_beads(
    grid: &PixelGrid,
    palette: &BeadPalette,
    matcher: &ColorMatcher,
) -> Result<Vec<BeadCount>, MatchError> {
    let mut per_color: HashMap<Rgb, usize> = HashMap::new();
    for &cell in &grid.cells {
        *per_color.entry(cell).or_default() += 1;
    }

    let (colors, cells): (Vec<Rgb>, Vec<usize>) = per_color.into_iter().unzip();
    let matches = matcher.match_all_rgb(colors, palette)?;

    let mut per_bead: HashMap<String, BeadCount> = HashMap::new();
    for (matched, n) in matches.into_iter().zip(cells) {
        per_bead
            .entry(matched.matched_id.clone())
            .or_insert_with(|| BeadCount {
                id: matched.matched_id,
                name: matched.matched_name,
                hex: matched.matched_hex,
                count: 0,
            })
            .count += n;
    }

    let mut counts: Vec<BeadCount> = per_bead.into_values().collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.id.cmp(&b.id)));

    tracing::debug!(
        cells = grid.len(),
        beads = counts.len(),
        "Counted beads"
    );
    Ok(counts)
}
