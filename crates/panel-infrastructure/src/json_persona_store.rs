//! JSON-backed PersonaStore implementation

use panel_core::config::PanelSettings;
use panel_core::error::{PanelError, Result};
use panel_core::persona::{Persona, PersonaStore};
use std::collections::HashSet;
use std::path::Path;

/// The 50-persona panel shipped with the binary.
const BUNDLED_PANEL: &str = include_str!("../data/personas.json");

/// A persona catalog parsed from a JSON array.
///
/// Responsibilities:
/// - Parse the bundled panel or an operator-supplied file
/// - Reject malformed panels (unknown tags, duplicate or zero ids, empty list)
///
/// Does NOT:
/// - Reload or mutate personas after construction
#[derive(Debug, Clone)]
pub struct JsonPersonaStore {
    personas: Vec<Persona>,
}

impl JsonPersonaStore {
    /// Creates a store from already-parsed personas, validating identity.
    pub fn new(personas: Vec<Persona>) -> Result<Self> {
        if personas.is_empty() {
            return Err(PanelError::config("Persona panel is empty"));
        }

        let mut seen = HashSet::with_capacity(personas.len());
        for persona in &personas {
            if persona.id == 0 {
                return Err(PanelError::config(format!(
                    "Persona '{}' has id 0; ids must be positive",
                    persona.name
                )));
            }
            if !seen.insert(persona.id) {
                return Err(PanelError::config(format!(
                    "Duplicate persona id {}",
                    persona.id
                )));
            }
        }

        Ok(Self { personas })
    }

    /// Loads the panel bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_PANEL)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let personas: Vec<Persona> = serde_json::from_str(json)?;
        Self::new(personas)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the panel selected by `settings`: the configured file if any,
    /// otherwise the bundled panel.
    pub fn load(settings: &PanelSettings) -> Result<Self> {
        let store = match &settings.persona_file {
            Some(path) => {
                tracing::info!("Loading persona panel from {}", path.display());
                Self::from_path(path)?
            }
            None => Self::bundled()?,
        };
        tracing::info!(personas = store.len(), "Persona panel loaded");
        Ok(store)
    }
}

impl PersonaStore for JsonPersonaStore {
    fn all(&self) -> &[Persona] {
        &self.personas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::persona::{SegmentField, SegmentFilter};

    #[test]
    fn test_bundled_panel_has_fifty_personas() {
        let store = JsonPersonaStore::bundled().expect("bundled panel should parse");
        assert_eq!(store.len(), 50);
        assert_eq!(store.all()[0].id, 1);
        assert_eq!(store.all()[49].id, 50);
    }

    #[test]
    fn test_bundled_distinct_tags() {
        let store = JsonPersonaStore::bundled().unwrap();
        assert_eq!(store.distinct(SegmentField::State).len(), 6);
        assert_eq!(store.distinct(SegmentField::Lifestyle).len(), 8);
        assert!(store.distinct(SegmentField::City).contains("Київ"));
    }

    #[test]
    fn test_city_filter_only_returns_that_city() {
        let store = JsonPersonaStore::bundled().unwrap();
        let filter = SegmentFilter::any().with(SegmentField::City, &["Київ"]);
        let kyiv = store.filter(&filter);

        assert!(!kyiv.is_empty());
        assert!(kyiv.iter().all(|p| p.city == "Київ"));
        let ids: Vec<u32> = kyiv.iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted, "filter must preserve panel order");
    }

    #[test]
    fn test_filter_is_repeatable() {
        let store = JsonPersonaStore::bundled().unwrap();
        let filter = SegmentFilter::any().with(SegmentField::State, &["stress", "sleep"]);
        assert_eq!(store.filter(&filter), store.filter(&filter));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut personas = JsonPersonaStore::bundled().unwrap().all().to_vec();
        personas[1].id = personas[0].id;
        let err = JsonPersonaStore::new(personas).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_unknown_tag_is_a_load_error() {
        let json = r#"[{"id":1,"name":"X","age":30,"gender":"male","city":"Київ",
            "occupation":"-","income":"-","state_primary":"anxiety","state_secondary":"sleep",
            "lifestyle":"skeptic","cbd_experience":"none","price_sensitivity":"low",
            "personality":"-"}]"#;
        let err = JsonPersonaStore::from_json_str(json).unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_empty_panel_is_rejected() {
        assert!(JsonPersonaStore::from_json_str("[]").is_err());
    }
}
