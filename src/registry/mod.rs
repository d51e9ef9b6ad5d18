use std::sync::Arc;

use crate::core::traits::ProviderAdapter;
use crate::core::types::ProviderId;

/// Ordered provider chain. Registration order is attempt order.
#[derive(Default)]
pub struct ProviderRegistry {
    adapters: Vec<(ProviderId, Arc<dyn ProviderAdapter>)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `adapter`, or swaps it in at the existing position when its id is
    /// already registered.
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        let provider = adapter.id();

        if let Some((_, existing_adapter)) = self
            .adapters
            .iter_mut()
            .find(|(registered_provider, _)| *registered_provider == provider)
        {
            *existing_adapter = adapter;
            return;
        }

        self.adapters.push((provider, adapter));
    }

    pub fn get(&self, provider: &ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters
            .iter()
            .find(|(registered_provider, _)| registered_provider == provider)
            .map(|(_, adapter)| Arc::clone(adapter))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ProviderAdapter>> {
        self.adapters.iter().map(|(_, adapter)| adapter)
    }

    pub fn ids(&self) -> Vec<ProviderId> {
        self.adapters
            .iter()
            .map(|(provider, _)| provider.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
