//! Category filtering ahead of aggregation
//!
//! Planets never become systems. Low-mass objects, white dwarfs and brown
//! dwarfs are dropped unless their [`InclusionFlags`] switch is on. Each
//! family is matched by exact token, in a confirmed and an uncertain (`?`)
//! variant. Anything unrecognized passes through.

use crate::core::models::{InclusionFlags, RawObservation};

/// Category families the filter knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFamily {
    Planet,
    LowMass,
    WhiteDwarf,
    BrownDwarf,
    /// Any other token, including ordinary stars (`*`)
    Other,
}

impl CategoryFamily {
    /// Classify a category token by exact match
    pub fn classify(token: &str) -> Self {
        match token {
            "Planet" => CategoryFamily::Planet,
            "LM" | "LM?" => CategoryFamily::LowMass,
            "WD" | "WD?" => CategoryFamily::WhiteDwarf,
            "BD" | "BD?" => CategoryFamily::BrownDwarf,
            _ => CategoryFamily::Other,
        }
    }

    /// Whether rows of this family survive the given flags
    pub fn is_included(self, flags: &InclusionFlags) -> bool {
        match self {
            CategoryFamily::Planet => false,
            CategoryFamily::LowMass => flags.include_low_mass,
            CategoryFamily::WhiteDwarf => flags.include_white_dwarf,
            CategoryFamily::BrownDwarf => flags.include_brown_dwarf,
            CategoryFamily::Other => true,
        }
    }
}

/// Whether a single row survives filtering
pub fn is_retained(row: &RawObservation, flags: &InclusionFlags) -> bool {
    CategoryFamily::classify(&row.category).is_included(flags)
}

/// Rows that survive filtering, in input order
pub fn filter_categories<'a>(
    rows: &'a [RawObservation],
    flags: &'a InclusionFlags,
) -> impl Iterator<Item = &'a RawObservation> + 'a {
    rows.iter().filter(move |row| is_retained(row, flags))
}
