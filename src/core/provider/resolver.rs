/*!
Algorithm resolution against a provider registry.

Checks always run in the same order: absent arguments first, then the
existence of a named provider, then the existence of the service.
Callers rely on this order to tell failure causes apart, e.g. an
unknown provider name is reported as such even when some other
provider offers the algorithm.
*/

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::core::error::{Error, Result};
use crate::core::provider::{Provider, ProviderRegistry, ServiceInstance};

/// Which providers a resolution may draw from
#[derive(Clone)]
pub enum ProviderSelector<'a> {
    /// Every installed provider, in registry order
    Any,
    /// Exactly one provider, looked up by name
    ByName(Option<&'a str>),
    /// A provider object supplied by the caller
    ByRef(Option<Arc<dyn Provider>>),
}

impl<'a> ProviderSelector<'a> {
    /// Select a provider by name
    pub fn name(name: &'a str) -> Self {
        ProviderSelector::ByName(Some(name))
    }

    /// Select a specific provider object
    pub fn provider(provider: Arc<dyn Provider>) -> Self {
        ProviderSelector::ByRef(Some(provider))
    }
}

impl fmt::Debug for ProviderSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSelector::Any => write!(f, "Any"),
            ProviderSelector::ByName(name) => f.debug_tuple("ByName").field(name).finish(),
            ProviderSelector::ByRef(provider) => f
                .debug_tuple("ByRef")
                .field(&provider.as_ref().map(|p| p.name()))
                .finish(),
        }
    }
}

/// A (service type, algorithm) capability request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceDescriptor {
    pub service_type: String,
    pub algorithm: String,
}

impl ServiceDescriptor {
    pub fn new(service_type: &str, algorithm: &str) -> Self {
        Self {
            service_type: service_type.to_string(),
            algorithm: algorithm.to_string(),
        }
    }
}

impl fmt::Display for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.service_type, self.algorithm)
    }
}

/// A service instance together with where it came from
pub struct ResolvedService {
    descriptor: ServiceDescriptor,
    provider: Arc<dyn Provider>,
    instance: ServiceInstance,
}

impl ResolvedService {
    /// The request this service satisfies
    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    /// Algorithm name as requested by the caller
    pub fn algorithm(&self) -> &str {
        &self.descriptor.algorithm
    }

    /// Provider that supplied the service
    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Borrow the instance as a concrete type
    pub fn instance<T: Any>(&self) -> Option<&T> {
        self.instance.downcast_ref::<T>()
    }

    /// Split into the typed instance, its provider and the algorithm name
    ///
    /// Fails with `InvalidArgument` if the provider registered the
    /// service with a different instance type.
    pub fn into_parts<T: Any>(self) -> Result<(T, Arc<dyn Provider>, String)> {
        let ResolvedService {
            descriptor,
            provider,
            instance,
        } = self;
        match instance.downcast::<T>() {
            Ok(typed) => Ok((*typed, provider, descriptor.algorithm)),
            Err(_) => crate::invalid_arg!(
                "provider {} registered {} with an unexpected instance type",
                provider.name(),
                descriptor
            ),
        }
    }
}

impl fmt::Debug for ResolvedService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedService")
            .field("descriptor", &self.descriptor)
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}

fn instantiate(provider: &Arc<dyn Provider>, descriptor: ServiceDescriptor) -> Result<Option<ResolvedService>> {
    let Some(factory) = provider.find_service(&descriptor.service_type, &descriptor.algorithm) else {
        log::trace!("Provider {} does not offer {}", provider.name(), descriptor);
        return Ok(None);
    };
    let instance = factory.new_instance()?;
    log::debug!("Resolved {} from provider {}", descriptor, provider.name());
    Ok(Some(ResolvedService {
        descriptor,
        provider: Arc::clone(provider),
        instance,
    }))
}

/// Resolve a service implementation
///
/// With [`ProviderSelector::Any`] the first provider in registry order
/// that offers the service wins. A factory that fails to instantiate
/// ends the search with its error.
pub fn resolve(
    registry: &dyn ProviderRegistry,
    service_type: &str,
    algorithm: Option<&str>,
    selector: ProviderSelector<'_>,
) -> Result<ResolvedService> {
    let Some(algorithm) = algorithm else {
        return crate::null_arg!("algorithm");
    };
    let descriptor = ServiceDescriptor::new(service_type, algorithm);

    let provider = match selector {
        ProviderSelector::Any => {
            for provider in registry.list_providers() {
                if let Some(service) = instantiate(&provider, descriptor.clone())? {
                    return Ok(service);
                }
            }
            return Err(Error::no_such_algorithm(service_type, algorithm));
        }
        ProviderSelector::ByName(None) => return crate::null_arg!("provider name"),
        ProviderSelector::ByName(Some(name)) => registry
            .find_provider(name)
            .ok_or_else(|| Error::NoSuchProvider(name.to_string()))?,
        ProviderSelector::ByRef(None) => return crate::invalid_arg!("provider must be present"),
        ProviderSelector::ByRef(Some(provider)) => provider,
    };

    instantiate(&provider, descriptor)?
        .ok_or_else(|| Error::no_such_algorithm(service_type, algorithm))
}
