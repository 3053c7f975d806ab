//! Aggregation of catalog rows into star systems
//!
//! Rows are grouped by system-group identifier in order of first
//! appearance. Each group becomes one [`StellarSystem`]:
//!
//! - name: the first row's system name, or its object name when empty
//! - position: mean RA, Dec and parallax of the group, converted once
//! - category and spectral type: from the first row
//! - components: one per row when the group has more than one row
//!
//! Ids are the group's index in the output, assigned after grouping.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::core::coordinates;
use crate::core::models::{Component, RawObservation, StellarSystem};

/// Rows sharing one system-group identifier; never empty
struct SystemGroup<'a> {
    rows: Vec<&'a RawObservation>,
}

impl<'a> SystemGroup<'a> {
    fn primary(&self) -> &'a RawObservation {
        self.rows[0]
    }

    fn display_name(&self) -> &'a str {
        let primary = self.primary();
        if primary.system_name.is_empty() {
            &primary.object_name
        } else {
            &primary.system_name
        }
    }

    /// Mean (ra, dec, parallax) over the group, in raw catalog units
    fn mean_sky_position(&self) -> (f64, f64, f64) {
        let n = self.rows.len() as f64;
        let (ra, dec, parallax) = self
            .rows
            .iter()
            .fold((0.0, 0.0, 0.0), |(ra, dec, plx), row| {
                (ra + row.ra, dec + row.dec, plx + row.parallax)
            });
        (ra / n, dec / n, parallax / n)
    }

    fn components(&self) -> Vec<Component> {
        if self.rows.len() < 2 {
            return Vec::new();
        }
        self.rows
            .iter()
            .map(|row| Component::new(row.object_name.clone(), row.spectral_type.clone()))
            .collect()
    }

    fn into_system(self, id: usize) -> StellarSystem {
        let (ra, dec, parallax) = self.mean_sky_position();
        let primary = self.primary();

        StellarSystem::new(
            id,
            self.display_name(),
            coordinates::to_point(ra, dec, parallax),
        )
        .with_category(primary.category.clone())
        .with_spectral_type(primary.spectral_type.clone())
        .with_components(self.components())
    }
}

/// Group rows by system in first-appearance order
fn group_rows<'a, I>(rows: I) -> Vec<SystemGroup<'a>>
where
    I: IntoIterator<Item = &'a RawObservation>,
{
    let mut slots: HashMap<i64, usize> = HashMap::new();
    let mut groups: Vec<SystemGroup<'a>> = Vec::new();

    for row in rows {
        match slots.entry(row.system_group) {
            Entry::Occupied(slot) => groups[*slot.get()].rows.push(row),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(SystemGroup { rows: vec![row] });
            }
        }
    }

    groups
}

/// Aggregate rows into systems with dense 0-based ids
pub fn aggregate<'a, I>(rows: I) -> Vec<StellarSystem>
where
    I: IntoIterator<Item = &'a RawObservation>,
{
    let systems: Vec<StellarSystem> = group_rows(rows)
        .into_iter()
        .enumerate()
        .map(|(id, group)| group.into_system(id))
        .collect();

    debug!(
        systems = systems.len(),
        multiple = systems.iter().filter(|s| s.is_multiple()).count(),
        "aggregated catalog rows"
    );
    systems
}
