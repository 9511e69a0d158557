//! Persona store trait.
//!
//! Defines the read-only interface over the persona panel.

use super::model::Persona;
use super::segment::{SegmentField, SegmentFilter};
use std::collections::BTreeSet;

/// An immutable catalog of personas, loaded once at startup.
///
/// The trait decouples the orchestration logic from where the panel comes
/// from (bundled data, a JSON file, a database snapshot). There are no
/// mutation operations; implementations only need to hand out the ordered
/// panel, and filtering is derived from it.
pub trait PersonaStore: Send + Sync {
    /// Returns every persona in panel order.
    fn all(&self) -> &[Persona];

    /// Returns the personas admitted by `filter`, preserving panel order.
    fn filter(&self, filter: &SegmentFilter) -> Vec<Persona> {
        self.all()
            .iter()
            .filter(|persona| filter.matches(persona))
            .cloned()
            .collect()
    }

    /// Returns the distinct tag values observed for `field`, sorted.
    fn distinct(&self, field: SegmentField) -> BTreeSet<String> {
        self.all()
            .iter()
            .map(|persona| field.value_of(persona).to_string())
            .collect()
    }

    /// Returns the panel size.
    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}
