/*!
Typed facades over resolved services.
*/

pub mod manager_factory;
pub mod security_context;
pub mod spi;

pub use manager_factory::{
    KeyManagerFactory, KeyStoreBuilder, KeyStoreBuilderParameters, ManagerFactory, ManagerKind,
    TrustManagerFactory,
};
pub use security_context::SecurityContext;
pub use spi::{
    ContextSpi, HostnameVerifier, ManagerFactorySpi, ManagerHandle, PeerSession, RejectAllVerifier,
    SocketFactory,
};
