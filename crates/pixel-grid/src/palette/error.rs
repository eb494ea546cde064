//! Error types for color parsing, palette validation and matching.

use std::fmt;

/// A color string that is not six hexadecimal digits after an optional `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColorFormat {
    input: String,
}

impl InvalidColorFormat {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The rejected input, verbatim.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for InvalidColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color format {:?} (expected 6 hex digits, optionally prefixed by '#')",
            self.input
        )
    }
}

impl std::error::Error for InvalidColorFormat {}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// An entry's hex color could not be parsed
    InvalidEntry {
        /// Id of the offending entry
        id: String,
        /// Underlying parse error
        source: InvalidColorFormat,
    },
    /// Two entries share the same id
    DuplicateId {
        /// The repeated id
        id: String,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::InvalidEntry { id, source } => {
                write!(f, "palette entry {id}: {source}")
            }
            PaletteError::DuplicateId { id } => {
                write!(f, "duplicate palette id {id}")
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::InvalidEntry { source, .. } => Some(source),
            PaletteError::DuplicateId { .. } => None,
        }
    }
}

/// Error type for a whole match call.
///
/// Per-color failures are reported alongside the successful matches instead;
/// see [`ColorMatcher::match_colors`](super::ColorMatcher::match_colors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The palette, after candidate filtering, has no entries
    NoCandidates,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NoCandidates => write!(f, "no candidate colors to match against"),
        }
    }
}

impl std::error::Error for MatchError {}

/// A distance method name other than `lab` or `rgb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown distance method {:?} (expected \"lab\" or \"rgb\")", self.0)
    }
}

impl std::error::Error for UnknownMethod {}
