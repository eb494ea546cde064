//! Ordered, validated bead palette.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::Rgb;

/// One bead color as supplied by the palette table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Manufacturer id (e.g. "P01")
    pub id: String,
    /// Hex color, `#RRGGBB`
    pub hex: String,
    /// Human-readable name
    pub name: String,
}

impl PaletteEntry {
    pub fn new(id: impl Into<String>, hex: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hex: hex.into(),
            name: name.into(),
        }
    }
}

/// An immutable, ordered bead palette.
///
/// Entry order is significant: it is the iteration order for matching and
/// therefore decides ties. Hex strings are parsed once at construction.
///
/// An empty palette is valid; matching against it reports
/// [`MatchError::NoCandidates`](super::MatchError::NoCandidates).
///
/// # Example
///
/// ```
/// use pixel_grid::{BeadPalette, PaletteEntry};
///
/// let palette = BeadPalette::new(vec![
///     PaletteEntry::new("P01", "#F1F1F1", "White"),
///     PaletteEntry::new("P18", "#2E2F32", "Black"),
/// ])
/// .unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.get("P18").unwrap().name, "Black");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BeadPalette {
    entries: Vec<PaletteEntry>,
    colors: Vec<Rgb>,
}

impl BeadPalette {
    /// Validate entries and build the palette.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::InvalidEntry`] if an entry's hex is malformed
    /// - [`PaletteError::DuplicateId`] if an id appears twice
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        let mut seen = HashSet::new();
        let mut colors = Vec::with_capacity(entries.len());

        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(PaletteError::DuplicateId {
                    id: entry.id.clone(),
                });
            }
            let rgb = entry
                .hex
                .parse::<Rgb>()
                .map_err(|source| PaletteError::InvalidEntry {
                    id: entry.id.clone(),
                    source,
                })?;
            colors.push(rgb);
        }

        Ok(Self { entries, colors })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in palette order.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries paired with their parsed color, in palette order.
    pub fn iter(&self) -> impl Iterator<Item = (&PaletteEntry, Rgb)> + '_ {
        self.entries.iter().zip(self.colors.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::InvalidColorFormat;

    #[test]
    fn test_construction_keeps_order() {
        let palette = BeadPalette::new(vec![
            PaletteEntry::new("B", "#000000", "Black"),
            PaletteEntry::new("A", "ffffff", "White"),
        ])
        .unwrap();

        let ids: Vec<&str> = palette.iter().map(|(e, _)| e.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
        let colors: Vec<Rgb> = palette.iter().map(|(_, c)| c).collect();
        assert_eq!(colors, [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
    }

    #[test]
    fn test_empty_palette_is_valid() {
        let palette = BeadPalette::new(Vec::new()).unwrap();
        assert!(palette.is_empty());
        assert!(palette.get("P01").is_none());
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let result = BeadPalette::new(vec![PaletteEntry::new("P05", "red", "Red")]);
        assert_eq!(
            result.unwrap_err(),
            PaletteError::InvalidEntry {
                id: "P05".to_string(),
                source: InvalidColorFormat::new("red"),
            }
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = BeadPalette::new(vec![
            PaletteEntry::new("P01", "#FFFFFF", "White"),
            PaletteEntry::new("P01", "#000000", "Black"),
        ]);
        assert!(matches!(result, Err(PaletteError::DuplicateId { id }) if id == "P01"));
    }

    #[test]
    fn test_get_by_id() {
        let palette = BeadPalette::new(vec![PaletteEntry::new("P03", "#ECD800", "Yellow")]).unwrap();
        assert_eq!(palette.get("P03").unwrap().hex, "#ECD800");
        assert!(palette.get("p03").is_none());
    }
}
