/*!
Process-wide security defaults.

[`SecurityDefaults`] owns the default slots and the registry they are
resolved from. It is an ordinary value: create one at start-up and hand
it to whatever needs defaults.
*/

use std::fmt;
use std::sync::Arc;

use crate::core::config::SecurityConfig;
use crate::core::context::{
    HostnameVerifier, KeyManagerFactory, RejectAllVerifier, SecurityContext, SocketFactory,
    TrustManagerFactory,
};
use crate::core::defaults::slot::DefaultSlot;
use crate::core::error::Result;
use crate::core::provider::{ProviderRegistry, ProviderSelector};

/// Default security context, socket factory and hostname verifier
pub struct SecurityDefaults {
    registry: Arc<dyn ProviderRegistry>,
    config: SecurityConfig,
    context: DefaultSlot<Arc<SecurityContext>>,
    socket_factory: DefaultSlot<Arc<dyn SocketFactory>>,
    hostname_verifier: DefaultSlot<Arc<dyn HostnameVerifier>>,
}

impl SecurityDefaults {
    /// Create defaults backed by `registry` with the default configuration
    pub fn new(registry: Arc<dyn ProviderRegistry>) -> Self {
        Self::build(registry, SecurityConfig::default())
    }

    /// Create defaults with a validated configuration
    pub fn with_config(registry: Arc<dyn ProviderRegistry>, config: SecurityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(registry, config))
    }

    fn build(registry: Arc<dyn ProviderRegistry>, config: SecurityConfig) -> Self {
        Self {
            context: DefaultSlot::new("security context", config.context_strategy),
            socket_factory: DefaultSlot::new("socket factory", config.socket_factory_strategy),
            hostname_verifier: DefaultSlot::new("hostname verifier", config.verifier_strategy),
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<dyn ProviderRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    /// Default security context
    ///
    /// Built on first use by resolving the configured default protocol
    /// across all providers.
    pub fn default_context(&self) -> Result<Arc<SecurityContext>> {
        self.context.get_or_init(|| {
            SecurityContext::get_instance(
                self.registry.as_ref(),
                Some(self.config.default_context_protocol.as_str()),
                ProviderSelector::Any,
            )
            .map(Arc::new)
        })
    }

    /// Replace the default security context
    pub fn set_default_context(&self, context: Arc<SecurityContext>) {
        self.context.set(context);
    }

    /// Default socket factory, taken from the default context on first use
    pub fn default_socket_factory(&self) -> Result<Arc<dyn SocketFactory>> {
        self.socket_factory
            .get_or_init(|| self.default_context()?.socket_factory())
    }

    /// Replace the default socket factory
    pub fn set_default_socket_factory(&self, factory: Arc<dyn SocketFactory>) {
        self.socket_factory.set(factory);
    }

    /// Default hostname verifier
    ///
    /// Until one is installed the default rejects every host.
    pub fn default_hostname_verifier(&self) -> Result<Arc<dyn HostnameVerifier>> {
        self.hostname_verifier.get_or_init(|| {
            let verifier: Arc<dyn HostnameVerifier> = Arc::new(RejectAllVerifier);
            Ok(verifier)
        })
    }

    /// Replace the default hostname verifier
    pub fn set_default_hostname_verifier(&self, verifier: Arc<dyn HostnameVerifier>) {
        self.hostname_verifier.set(verifier);
    }

    /// Resolve a key manager factory for the configured default algorithm
    pub fn default_key_manager_factory(&self) -> Result<KeyManagerFactory> {
        KeyManagerFactory::get_instance(
            self.registry.as_ref(),
            Some(KeyManagerFactory::default_algorithm(&self.config)),
            ProviderSelector::Any,
        )
    }

    /// Resolve a trust manager factory for the configured default algorithm
    pub fn default_trust_manager_factory(&self) -> Result<TrustManagerFactory> {
        TrustManagerFactory::get_instance(
            self.registry.as_ref(),
            Some(TrustManagerFactory::default_algorithm(&self.config)),
            ProviderSelector::Any,
        )
    }
}

impl fmt::Debug for SecurityDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityDefaults")
            .field("config", &self.config)
            .field("context", &self.context.state())
            .field("socket_factory", &self.socket_factory.state())
            .field("hostname_verifier", &self.hostname_verifier.state())
            .finish_non_exhaustive()
    }
}
