/*!
# TLS Provider Core

Configuration and resolution plumbing underneath a TLS API.

## Overview

This library provides the parts of a TLS API that sit between the
application and a concrete TLS implementation:

- Algorithm resolution across an ordered registry of security providers
- Process defaults (security context, socket factory, hostname verifier)
  that are built lazily and stay consistent under concurrent first use
- Reconciliation of generic session parameters with an engine's own
  configuration surface, with fixed client authentication precedence
- SNI server names with IDNA normalization, case-insensitive host name
  equality and pattern-based matchers

The handshake, record layer and certificate validation are left to the
providers.
*/

// Core components
pub mod core;

// Re-export commonly used types for convenience
pub use self::core::constants::{service_types, VERSION};
pub use self::core::error::{Error, ErrorKind, Result};
pub use self::core::config::SecurityConfig;

// Provider registry and resolution
pub use self::core::provider::{
    resolve, Provider, ProviderList, ProviderRegistry, ProviderSelector, ResolvedService,
    ServiceDescriptor, ServiceFactory, ServiceInstance, SharedRegistry, StaticProvider,
};

// Service facades and provider capabilities
pub use self::core::context::{
    ContextSpi, HostnameVerifier, KeyManagerFactory, KeyStoreBuilder, KeyStoreBuilderParameters,
    ManagerFactorySpi, ManagerHandle, PeerSession, RejectAllVerifier, SecurityContext,
    SocketFactory, TrustManagerFactory,
};

// Process defaults
pub use self::core::defaults::{DefaultSlot, InitStrategy, SecurityDefaults, SlotState};

// Session parameters
pub use self::core::params::{
    apply_parameters, export_parameters, AlgorithmConstraints, ClientAuth, ConfigurableEngine,
    SessionParameters,
};

// SNI
pub use self::core::sni::{
    build_matcher, RawServerName, ServerNameMatcher, SniHostName, SniMatcher, SniServerName,
};
