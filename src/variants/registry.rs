//! Variant registry for settings lookup.
//!
//! Populated once at startup, before any game is created, then shared
//! read-only (typically behind an `Arc`).

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::settings::{GameSettings, ReleaseStage};
use crate::core::ConfigError;

/// Registry of variant settings bundles.
///
/// ```
/// use rail_rules::variants::{GameSettings, VariantRegistry};
///
/// let mut registry = VariantRegistry::new();
/// registry.register(GameSettings::builder("base", "Base Game").build().unwrap()).unwrap();
///
/// assert_eq!(registry.get("base").unwrap().name(), "Base Game");
/// assert!(registry.get("missing").is_err());
/// ```
#[derive(Debug, Default)]
pub struct VariantRegistry {
    variants: Vec<Arc<GameSettings>>,
    by_id: FxHashMap<String, usize>,
}

impl VariantRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle. Fails if its id is already taken.
    pub fn register(&mut self, settings: GameSettings) -> Result<Arc<GameSettings>, ConfigError> {
        if self.by_id.contains_key(settings.id()) {
            return Err(ConfigError::DuplicateVariant(settings.id().to_string()));
        }
        let settings = Arc::new(settings);
        self.by_id.insert(settings.id().to_string(), self.variants.len());
        self.variants.push(Arc::clone(&settings));
        Ok(settings)
    }

    /// Look up a bundle by id.
    pub fn get(&self, id: &str) -> Result<Arc<GameSettings>, ConfigError> {
        self.by_id
            .get(id)
            .map(|&i| Arc::clone(&self.variants[i]))
            .ok_or_else(|| ConfigError::UnknownVariant(id.to_string()))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Every bundle, in registration order.
    pub fn values(&self) -> impl Iterator<Item = &Arc<GameSettings>> {
        self.variants.iter()
    }

    /// Bundles at least as mature as `stage`, excluding deprecated ones.
    pub fn released(&self, stage: ReleaseStage) -> impl Iterator<Item = &Arc<GameSettings>> {
        self.variants
            .iter()
            .filter(move |s| s.stage() >= stage && s.stage() != ReleaseStage::Deprecated)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(id: &str, stage: ReleaseStage) -> GameSettings {
        GameSettings::builder(id, id.to_uppercase())
            .with_stage(stage)
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_and_get_same_bundle() {
        let mut registry = VariantRegistry::new();
        let registered = registry.register(bundle("a", ReleaseStage::Beta)).unwrap();
        let found = registry.get("a").unwrap();
        assert!(Arc::ptr_eq(&registered, &found));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = VariantRegistry::new();
        registry.register(bundle("a", ReleaseStage::Beta)).unwrap();
        let err = registry.register(bundle("a", ReleaseStage::Alpha)).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateVariant("a".into()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().stage(), ReleaseStage::Beta);
    }

    #[test]
    fn test_unknown_lookup_fails() {
        let registry = VariantRegistry::new();
        assert_eq!(
            registry.get("nope").unwrap_err(),
            ConfigError::UnknownVariant("nope".into())
        );
    }

    #[test]
    fn test_values_in_registration_order() {
        let mut registry = VariantRegistry::new();
        for id in ["c", "a", "b"] {
            registry.register(bundle(id, ReleaseStage::Production)).unwrap();
        }
        let ids: Vec<_> = registry.values().map(|s| s.id().to_string()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_released_filter() {
        let mut registry = VariantRegistry::new();
        registry.register(bundle("dev", ReleaseStage::Development)).unwrap();
        registry.register(bundle("beta", ReleaseStage::Beta)).unwrap();
        registry.register(bundle("old", ReleaseStage::Deprecated)).unwrap();

        let ids: Vec<_> = registry.released(ReleaseStage::Alpha).map(|s| s.id()).collect();
        assert_eq!(ids, vec!["beta"]);
    }
}
