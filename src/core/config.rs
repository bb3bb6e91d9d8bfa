/*!
Runtime configuration for default resolution.

The configuration decides which protocol builds the default security
context, which algorithms the manager factories report as their
defaults, and how each default slot publishes its value.
*/

use std::collections::HashMap;

use crate::core::constants::{algorithms, env, properties};
use crate::core::defaults::InitStrategy;
use crate::core::error::Result;

/// Configuration for a [`crate::SecurityDefaults`] instance
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SecurityConfig {
    /// Protocol resolved for the default security context
    pub default_context_protocol: String,
    /// Configured key manager factory algorithm
    pub key_manager_algorithm: Option<String>,
    /// Configured trust manager factory algorithm
    pub trust_manager_algorithm: Option<String>,
    /// Publication strategy for the default context slot
    pub context_strategy: InitStrategy,
    /// Publication strategy for the default socket factory slot
    pub socket_factory_strategy: InitStrategy,
    /// Publication strategy for the default hostname verifier slot
    pub verifier_strategy: InitStrategy,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            default_context_protocol: algorithms::DEFAULT_CONTEXT.to_string(),
            key_manager_algorithm: None,
            trust_manager_algorithm: None,
            context_strategy: InitStrategy::Locked,
            socket_factory_strategy: InitStrategy::LockFree,
            verifier_strategy: InitStrategy::Locked,
        }
    }
}

impl SecurityConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration where every slot uses the lock-free strategy
    pub fn lock_free() -> Self {
        Self {
            context_strategy: InitStrategy::LockFree,
            socket_factory_strategy: InitStrategy::LockFree,
            verifier_strategy: InitStrategy::LockFree,
            ..Self::default()
        }
    }

    /// Create a configuration where every slot serializes construction
    pub fn locked() -> Self {
        Self {
            context_strategy: InitStrategy::Locked,
            socket_factory_strategy: InitStrategy::Locked,
            verifier_strategy: InitStrategy::Locked,
            ..Self::default()
        }
    }

    /// Build a configuration from a security property map
    ///
    /// Unknown keys are ignored. Blank values count as unset.
    pub fn from_properties(props: &HashMap<String, String>) -> Self {
        let lookup = |key: &str| {
            props
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            key_manager_algorithm: lookup(properties::KEY_MANAGER_ALGORITHM),
            trust_manager_algorithm: lookup(properties::TRUST_MANAGER_ALGORITHM),
            ..Self::default()
        }
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> Self {
        let var = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self {
            key_manager_algorithm: var(env::KEY_MANAGER_ALGORITHM),
            trust_manager_algorithm: var(env::TRUST_MANAGER_ALGORITHM),
            ..Self::default()
        };
        if let Some(protocol) = var(env::DEFAULT_CONTEXT_PROTOCOL) {
            config.default_context_protocol = protocol;
        }
        log::debug!(
            "Loaded security config from environment (context protocol: {})",
            config.default_context_protocol
        );
        config
    }

    /// Use a specific protocol for the default security context
    pub fn with_default_context_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.default_context_protocol = protocol.into();
        self
    }

    /// Use a specific key manager factory algorithm
    pub fn with_key_manager_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.key_manager_algorithm = Some(algorithm.into());
        self
    }

    /// Use a specific trust manager factory algorithm
    pub fn with_trust_manager_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.trust_manager_algorithm = Some(algorithm.into());
        self
    }

    /// Default key manager factory algorithm
    pub fn key_manager_algorithm(&self) -> &str {
        self.key_manager_algorithm
            .as_deref()
            .unwrap_or(algorithms::FALLBACK_MANAGER)
    }

    /// Default trust manager factory algorithm
    pub fn trust_manager_algorithm(&self) -> &str {
        self.trust_manager_algorithm
            .as_deref()
            .unwrap_or(algorithms::FALLBACK_MANAGER)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_context_protocol.trim().is_empty() {
            return crate::invalid_arg!("default context protocol must not be blank");
        }
        if matches!(self.key_manager_algorithm.as_deref(), Some(a) if a.trim().is_empty()) {
            return crate::invalid_arg!("key manager algorithm must not be blank");
        }
        if matches!(self.trust_manager_algorithm.as_deref(), Some(a) if a.trim().is_empty()) {
            return crate::invalid_arg!("trust manager algorithm must not be blank");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    #[test]
    fn test_default_config() {
        let config = SecurityConfig::default();
        assert_eq!(config.default_context_protocol, "Default");
        assert_eq!(config.key_manager_algorithm(), "SunX509");
        assert_eq!(config.trust_manager_algorithm(), "SunX509");
        assert_eq!(config.context_strategy, InitStrategy::Locked);
        assert_eq!(config.socket_factory_strategy, InitStrategy::LockFree);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_configs() {
        let config = SecurityConfig::lock_free();
        assert_eq!(config.context_strategy, InitStrategy::LockFree);
        assert_eq!(config.verifier_strategy, InitStrategy::LockFree);

        let config = SecurityConfig::locked();
        assert_eq!(config.socket_factory_strategy, InitStrategy::Locked);
    }

    #[test]
    fn test_from_properties() {
        let mut props = HashMap::new();
        props.insert(
            "ssl.KeyManagerFactory.algorithm".to_string(),
            "PKIX".to_string(),
        );
        props.insert("ssl.TrustManagerFactory.algorithm".to_string(), "  ".to_string());

        let config = SecurityConfig::from_properties(&props);
        assert_eq!(config.key_manager_algorithm(), "PKIX");
        assert_eq!(config.trust_manager_algorithm(), "SunX509");
    }

    #[test]
    fn test_validate_rejects_blank() {
        let config = SecurityConfig::new().with_default_context_protocol(" ");
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));

        let config = SecurityConfig::new().with_key_manager_algorithm("");
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
    }
}
