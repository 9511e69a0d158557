//! Segment catalog exposed to the frontend.

use panel_core::persona::{ConcernTag, Lifestyle, PersonaStore, SegmentField};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Distinct segment values in the loaded panel plus display labels.
///
/// Label dictionaries cover the full tag vocabularies, not only the tags
/// present in the panel.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SegmentCatalog {
    pub states: Vec<String>,
    pub lifestyles: Vec<String>,
    pub cities: Vec<String>,
    pub state_labels: BTreeMap<String, String>,
    pub lifestyle_labels: BTreeMap<String, String>,
}

impl SegmentCatalog {
    pub fn from_store(store: &dyn PersonaStore) -> Self {
        Self {
            states: store.distinct(SegmentField::State).into_iter().collect(),
            lifestyles: store.distinct(SegmentField::Lifestyle).into_iter().collect(),
            cities: store.distinct(SegmentField::City).into_iter().collect(),
            state_labels: ConcernTag::iter()
                .map(|tag| (tag.to_string(), tag.label().to_string()))
                .collect(),
            lifestyle_labels: Lifestyle::iter()
                .map(|tag| (tag.to_string(), tag.label().to_string()))
                .collect(),
        }
    }
}
