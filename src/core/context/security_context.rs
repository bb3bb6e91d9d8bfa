/*!
Security context facade.

A [`SecurityContext`] is a resolved `SSLContext` service: the provider's
[`ContextSpi`] plus the protocol name and provider it was resolved
with.
*/

use std::fmt;
use std::sync::Arc;

use crate::core::constants::service_types;
use crate::core::context::spi::{ContextSpi, ManagerHandle, SocketFactory};
use crate::core::error::Result;
use crate::core::params::{ConfigurableEngine, SessionParameters};
use crate::core::provider::{resolve, Provider, ProviderRegistry, ProviderSelector};

/// Handle to a provider-supplied security context
pub struct SecurityContext {
    spi: Box<dyn ContextSpi>,
    provider: Arc<dyn Provider>,
    protocol: String,
}

impl SecurityContext {
    /// Wrap an already constructed context implementation
    pub fn new(spi: Box<dyn ContextSpi>, provider: Arc<dyn Provider>, protocol: impl Into<String>) -> Self {
        Self {
            spi,
            provider,
            protocol: protocol.into(),
        }
    }

    /// Resolve a context for `protocol`
    ///
    /// Providers must register the service with instance type
    /// `Box<dyn ContextSpi>`.
    pub fn get_instance(
        registry: &dyn ProviderRegistry,
        protocol: Option<&str>,
        selector: ProviderSelector<'_>,
    ) -> Result<Self> {
        let service = resolve(registry, service_types::SSL_CONTEXT, protocol, selector)?;
        let (spi, provider, protocol) = service.into_parts::<Box<dyn ContextSpi>>()?;
        Ok(Self::new(spi, provider, protocol))
    }

    /// Protocol name the context was requested with
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Provider that supplied the context
    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Initialize the context with key and trust managers
    ///
    /// Typically fed from [`crate::KeyManagerFactory::managers`] and
    /// [`crate::TrustManagerFactory::managers`].
    pub fn init(&mut self, key_managers: &[ManagerHandle], trust_managers: &[ManagerHandle]) -> Result<()> {
        log::debug!(
            "Initializing {} context from provider {} ({} key, {} trust managers)",
            self.protocol,
            self.provider.name(),
            key_managers.len(),
            trust_managers.len()
        );
        self.spi.init(key_managers, trust_managers)
    }

    pub fn socket_factory(&self) -> Result<Arc<dyn SocketFactory>> {
        self.spi.socket_factory()
    }

    pub fn server_socket_factory(&self) -> Result<Arc<dyn SocketFactory>> {
        self.spi.server_socket_factory()
    }

    /// Create an engine with no peer information
    pub fn create_engine(&self) -> Result<Box<dyn ConfigurableEngine>> {
        self.spi.create_engine(None)
    }

    /// Create an engine for a known peer
    pub fn create_engine_for(&self, host: &str, port: u16) -> Result<Box<dyn ConfigurableEngine>> {
        self.spi.create_engine(Some((host, port)))
    }

    pub fn default_parameters(&self) -> SessionParameters {
        self.spi.default_parameters()
    }

    pub fn supported_parameters(&self) -> SessionParameters {
        self.spi.supported_parameters()
    }
}

impl fmt::Debug for SecurityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityContext")
            .field("protocol", &self.protocol)
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}
