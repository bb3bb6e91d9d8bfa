/*!
Key and trust manager factory facades.

Both factories resolve through the same contract as security contexts,
only under their own service type. Each also knows its configured
default algorithm.
*/

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::core::config::SecurityConfig;
use crate::core::constants::service_types;
use crate::core::context::spi::{ManagerFactorySpi, ManagerHandle};
use crate::core::error::Result;
use crate::core::provider::{resolve, Provider, ProviderRegistry, ProviderSelector};

/// Opaque key store builder handed through to providers
pub type KeyStoreBuilder = Arc<dyn Any + Send + Sync>;

/// Non-empty, immutable list of key store builders
#[derive(Clone)]
pub struct KeyStoreBuilderParameters {
    builders: Arc<[KeyStoreBuilder]>,
}

impl KeyStoreBuilderParameters {
    /// Create parameters from a list of builders
    ///
    /// An absent list fails with `NullArgument`, an empty one with
    /// `InvalidArgument`.
    pub fn new(builders: Option<Vec<KeyStoreBuilder>>) -> Result<Self> {
        let Some(builders) = builders else {
            return crate::null_arg!("key store builders");
        };
        if builders.is_empty() {
            return crate::invalid_arg!("key store builder list must not be empty");
        }
        Ok(Self {
            builders: builders.into(),
        })
    }

    /// Create parameters from a single builder
    pub fn single(builder: Option<KeyStoreBuilder>) -> Result<Self> {
        let Some(builder) = builder else {
            return crate::null_arg!("key store builder");
        };
        Ok(Self {
            builders: Arc::from(vec![builder]),
        })
    }

    pub fn builders(&self) -> &[KeyStoreBuilder] {
        &self.builders
    }
}

impl fmt::Debug for KeyStoreBuilderParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStoreBuilderParameters")
            .field("builders", &self.builders.len())
            .finish()
    }
}

/// Kind of manager a factory produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerKind {
    Key,
    Trust,
}

impl ManagerKind {
    /// Service type the factory is registered under
    pub fn service_type(&self) -> &'static str {
        match self {
            ManagerKind::Key => service_types::KEY_MANAGER_FACTORY,
            ManagerKind::Trust => service_types::TRUST_MANAGER_FACTORY,
        }
    }

    /// Configured default algorithm for this kind
    pub fn default_algorithm(self, config: &SecurityConfig) -> &str {
        match self {
            ManagerKind::Key => config.key_manager_algorithm(),
            ManagerKind::Trust => config.trust_manager_algorithm(),
        }
    }
}

/// Shared facade behind [`KeyManagerFactory`] and [`TrustManagerFactory`]
pub struct ManagerFactory {
    kind: ManagerKind,
    spi: Box<dyn ManagerFactorySpi>,
    provider: Arc<dyn Provider>,
    algorithm: String,
}

impl ManagerFactory {
    fn get_instance(
        kind: ManagerKind,
        registry: &dyn ProviderRegistry,
        algorithm: Option<&str>,
        selector: ProviderSelector<'_>,
    ) -> Result<Self> {
        let service = resolve(registry, kind.service_type(), algorithm, selector)?;
        let (spi, provider, algorithm) = service.into_parts::<Box<dyn ManagerFactorySpi>>()?;
        Ok(Self {
            kind,
            spi,
            provider,
            algorithm,
        })
    }

    pub fn kind(&self) -> ManagerKind {
        self.kind
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Initialize the factory
    pub fn init(&mut self, params: &KeyStoreBuilderParameters) -> Result<()> {
        self.spi.init(params)
    }

    /// Managers produced by the factory
    pub fn managers(&self) -> Result<Vec<ManagerHandle>> {
        self.spi.managers()
    }
}

impl fmt::Debug for ManagerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerFactory")
            .field("kind", &self.kind)
            .field("algorithm", &self.algorithm)
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}

macro_rules! manager_factory {
    ($name:ident, $kind:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug)]
        pub struct $name(ManagerFactory);

        impl $name {
            /// Resolve a factory for `algorithm`
            ///
            /// Providers must register the service with instance type
            /// `Box<dyn ManagerFactorySpi>`.
            pub fn get_instance(
                registry: &dyn ProviderRegistry,
                algorithm: Option<&str>,
                selector: ProviderSelector<'_>,
            ) -> Result<Self> {
                ManagerFactory::get_instance($kind, registry, algorithm, selector).map($name)
            }

            /// Algorithm used when the caller does not name one
            pub fn default_algorithm(config: &SecurityConfig) -> &str {
                $kind.default_algorithm(config)
            }
        }

        impl std::ops::Deref for $name {
            type Target = ManagerFactory;

            fn deref(&self) -> &ManagerFactory {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut ManagerFactory {
                &mut self.0
            }
        }
    };
}

manager_factory!(KeyManagerFactory, ManagerKind::Key, "Factory for key managers");
manager_factory!(TrustManagerFactory, ManagerKind::Trust, "Factory for trust managers");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn test_builder_parameters_validation() {
        let err = KeyStoreBuilderParameters::new(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullArgument);

        let err = KeyStoreBuilderParameters::new(Some(Vec::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = KeyStoreBuilderParameters::single(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullArgument);

        let builder: KeyStoreBuilder = Arc::new("pkcs12");
        let params = KeyStoreBuilderParameters::new(Some(vec![builder.clone(), builder])).unwrap();
        assert_eq!(params.builders().len(), 2);
    }

    #[test]
    fn test_default_algorithms() {
        let config = SecurityConfig::new().with_trust_manager_algorithm("PKIX");
        assert_eq!(KeyManagerFactory::default_algorithm(&config), "SunX509");
        assert_eq!(TrustManagerFactory::default_algorithm(&config), "PKIX");
    }

    #[test]
    fn test_service_types() {
        assert_eq!(ManagerKind::Key.service_type(), "KeyManagerFactory");
        assert_eq!(ManagerKind::Trust.service_type(), "TrustManagerFactory");
    }
}
