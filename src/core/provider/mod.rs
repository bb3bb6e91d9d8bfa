/*!
Security providers and algorithm resolution.

A provider is a named source of service implementations, keyed by
service type and algorithm name. Providers are installed in an ordered
registry; the resolver walks that registry to turn an algorithm request
into a concrete service instance.
*/

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::core::error::Result;

// In-memory provider and registry implementations
pub mod registry;

// Algorithm resolution
pub mod resolver;

pub use registry::{ProviderList, SharedRegistry, StaticProvider};
pub use resolver::{resolve, ProviderSelector, ResolvedService, ServiceDescriptor};

/// Type-erased product of a service factory
pub type ServiceInstance = Box<dyn Any + Send + Sync>;

/// Factory for one registered service
pub trait ServiceFactory: Send + Sync {
    /// Produce a fresh service instance
    fn new_instance(&self) -> Result<ServiceInstance>;
}

/// A named source of service implementations
pub trait Provider: Send + Sync {
    /// Registered name of the provider
    fn name(&self) -> &str;

    /// Find the factory for a service, if this provider offers it
    fn find_service(&self, service_type: &str, algorithm: &str) -> Option<Arc<dyn ServiceFactory>>;
}

impl fmt::Debug for dyn Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider").field("name", &self.name()).finish()
    }
}

/// Ordered set of installed providers
///
/// Implementations must return a consistent snapshot for the duration
/// of a single call; the crate never mutates a registry.
pub trait ProviderRegistry: Send + Sync {
    /// Installed providers in preference order
    fn list_providers(&self) -> Vec<Arc<dyn Provider>>;

    /// Look up a provider by its registered name
    fn find_provider(&self, name: &str) -> Option<Arc<dyn Provider>>;
}
