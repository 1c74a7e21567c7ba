//! Fixed provider registry keyed by jurisdiction.

use std::collections::HashMap;
use std::sync::Arc;

use tendermesh_core::{Jurisdiction, JurisdictionInfo};

use crate::adapter::TenderProvider;
use crate::australia::AustraliaProvider;
use crate::canada::CanadaProvider;
use crate::uk::UkProvider;
use crate::usa::UsaProvider;

/// Immutable set of registered providers, built once at startup.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<Jurisdiction, Arc<dyn TenderProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers all four national providers. USA credentials come from
    /// the environment.
    pub fn with_default_providers() -> Self {
        let mut registry = Self::new();
        registry.insert(Arc::new(UsaProvider::from_env()));
        registry.insert(Arc::new(UkProvider::new()));
        registry.insert(Arc::new(CanadaProvider::new()));
        registry.insert(Arc::new(AustraliaProvider::new()));
        registry
    }

    /// Registers a provider under its own jurisdiction, replacing any
    /// existing entry.
    pub fn insert(&mut self, provider: Arc<dyn TenderProvider>) {
        self.providers.insert(provider.jurisdiction(), provider);
    }

    pub fn get(&self, jurisdiction: Jurisdiction) -> Option<Arc<dyn TenderProvider>> {
        self.providers.get(&jurisdiction).cloned()
    }

    pub fn contains(&self, jurisdiction: Jurisdiction) -> bool {
        self.providers.contains_key(&jurisdiction)
    }

    /// Registered jurisdictions in canonical order.
    pub fn jurisdictions(&self) -> Vec<Jurisdiction> {
        let mut all: Vec<Jurisdiction> = self.providers.keys().copied().collect();
        all.sort();
        all
    }

    /// Code and display name for every registered jurisdiction, sorted.
    pub fn infos(&self) -> Vec<JurisdictionInfo> {
        self.jurisdictions().iter().map(|j| j.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
