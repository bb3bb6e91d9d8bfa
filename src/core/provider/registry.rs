/*!
In-memory providers and provider registries.

[`StaticProvider`] maps (service type, algorithm) pairs to factories
registered up front. [`ProviderList`] is an ordered registry of such
providers; [`SharedRegistry`] wraps one behind a lock so providers can
be installed while resolvers read it.
*/

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::error::Result;
use crate::core::provider::{Provider, ProviderRegistry, ServiceFactory, ServiceInstance};

/// Service factory backed by a closure
struct FnFactory<F> {
    make: F,
}

impl<F, T> ServiceFactory for FnFactory<F>
where
    F: Fn() -> Result<T> + Send + Sync,
    T: Any + Send + Sync,
{
    fn new_instance(&self) -> Result<ServiceInstance> {
        let instance = (self.make)()?;
        Ok(Box::new(instance))
    }
}

// Algorithm names match case-insensitively
fn service_key(service_type: &str, algorithm: &str) -> (String, String) {
    (service_type.to_string(), algorithm.to_ascii_uppercase())
}

/// Provider whose services are registered at construction time
pub struct StaticProvider {
    name: String,
    services: HashMap<(String, String), Arc<dyn ServiceFactory>>,
}

impl StaticProvider {
    /// Create a provider with no services
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            services: HashMap::new(),
        }
    }

    /// Register a service built by `make`
    ///
    /// The instance type `T` is what resolution hands back to the
    /// caller, typically a boxed trait object such as
    /// `Box<dyn ContextSpi>`.
    pub fn with_service<T, F>(mut self, service_type: &str, algorithm: &str, make: F) -> Self
    where
        F: Fn() -> Result<T> + Send + Sync + 'static,
        T: Any + Send + Sync,
    {
        self.register(service_type, algorithm, Arc::new(FnFactory { make }));
        self
    }

    /// Register an alias for an already registered algorithm
    ///
    /// Aliases of unknown algorithms are ignored.
    pub fn with_alias(mut self, service_type: &str, alias: &str, algorithm: &str) -> Self {
        let target = self.services.get(&service_key(service_type, algorithm)).cloned();
        match target {
            Some(factory) => self.register(service_type, alias, factory),
            None => log::warn!(
                "Provider {}: alias {} refers to unknown {} algorithm {}",
                self.name,
                alias,
                service_type,
                algorithm
            ),
        }
        self
    }

    /// Register a service factory
    pub fn register(&mut self, service_type: &str, algorithm: &str, factory: Arc<dyn ServiceFactory>) {
        self.services.insert(service_key(service_type, algorithm), factory);
    }

    /// List the algorithms registered for a service type
    pub fn algorithms(&self, service_type: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .services
            .keys()
            .filter(|(ty, _)| ty == service_type)
            .map(|(_, alg)| alg.clone())
            .collect();
        names.sort();
        names
    }

    /// Convert into a shareable provider handle
    pub fn into_arc(self) -> Arc<dyn Provider> {
        Arc::new(self)
    }
}

impl Provider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_service(&self, service_type: &str, algorithm: &str) -> Option<Arc<dyn ServiceFactory>> {
        self.services.get(&service_key(service_type, algorithm)).cloned()
    }
}

/// Ordered list of installed providers
#[derive(Default, Clone)]
pub struct ProviderList {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderList {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider at the lowest preference
    ///
    /// Returns `false` if a provider with the same name is already
    /// installed.
    pub fn add(&mut self, provider: Arc<dyn Provider>) -> bool {
        if self.contains(provider.name()) {
            return false;
        }
        self.providers.push(provider);
        true
    }

    /// Insert a provider at a zero-based preference position
    ///
    /// Positions past the end append.
    pub fn insert_at(&mut self, provider: Arc<dyn Provider>, position: usize) -> bool {
        if self.contains(provider.name()) {
            return false;
        }
        let position = position.min(self.providers.len());
        self.providers.insert(position, provider);
        true
    }

    /// Remove a provider by name
    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Provider>> {
        let index = self.providers.iter().position(|p| p.name() == name)?;
        Some(self.providers.remove(index))
    }

    /// Check whether a provider is installed
    pub fn contains(&self, name: &str) -> bool {
        self.providers.iter().any(|p| p.name() == name)
    }

    /// Number of installed providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check whether no providers are installed
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ProviderRegistry for ProviderList {
    fn list_providers(&self) -> Vec<Arc<dyn Provider>> {
        self.providers.clone()
    }

    fn find_provider(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.iter().find(|p| p.name() == name).cloned()
    }
}

impl FromIterator<Arc<dyn Provider>> for ProviderList {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Provider>>>(iter: I) -> Self {
        let mut list = ProviderList::new();
        for provider in iter {
            list.add(provider);
        }
        list
    }
}

/// Provider list that can be updated while it is being read
#[derive(Default)]
pub struct SharedRegistry {
    inner: RwLock<ProviderList>,
}

impl SharedRegistry {
    /// Wrap an existing provider list
    pub fn new(providers: ProviderList) -> Self {
        Self {
            inner: RwLock::new(providers),
        }
    }

    // A writer that panicked cannot leave the list half-updated, so a
    // poisoned lock is still safe to read.
    fn read(&self) -> RwLockReadGuard<'_, ProviderList> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProviderList> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Install a provider at the lowest preference
    pub fn add(&self, provider: Arc<dyn Provider>) -> bool {
        self.write().add(provider)
    }

    /// Install a provider at a preference position
    pub fn insert_at(&self, provider: Arc<dyn Provider>, position: usize) -> bool {
        self.write().insert_at(provider, position)
    }

    /// Remove a provider by name
    pub fn remove(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.write().remove(name)
    }

    /// Copy of the current provider list
    pub fn snapshot(&self) -> ProviderList {
        self.read().clone()
    }
}

impl ProviderRegistry for SharedRegistry {
    fn list_providers(&self) -> Vec<Arc<dyn Provider>> {
        self.read().list_providers()
    }

    fn find_provider(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.read().find_provider(name)
    }
}
