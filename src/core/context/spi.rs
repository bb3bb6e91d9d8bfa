/*!
Capability traits implemented by providers.

Facades such as [`crate::SecurityContext`] hold one of these trait
objects and forward every call to it; the provider decides what the
capability actually does.
*/

use std::any::Any;
use std::sync::Arc;

use crate::core::context::manager_factory::KeyStoreBuilderParameters;
use crate::core::error::Result;
use crate::core::params::{ConfigurableEngine, SessionParameters};

/// Opaque key or trust manager produced by a manager factory
pub type ManagerHandle = Arc<dyn Any + Send + Sync>;

/// Provider side of a security context
pub trait ContextSpi: Send + Sync {
    /// Initialize the context with key and trust managers
    ///
    /// Empty slices leave the choice of managers to the provider.
    fn init(&mut self, key_managers: &[ManagerHandle], trust_managers: &[ManagerHandle]) -> Result<()>;

    /// Socket factory bound to this context
    fn socket_factory(&self) -> Result<Arc<dyn SocketFactory>>;

    /// Server socket factory bound to this context
    fn server_socket_factory(&self) -> Result<Arc<dyn SocketFactory>>;

    /// Create an engine, optionally for a known peer
    fn create_engine(&self, peer: Option<(&str, u16)>) -> Result<Box<dyn ConfigurableEngine>>;

    /// Parameters new engines start from
    fn default_parameters(&self) -> SessionParameters;

    /// Everything the context is able to negotiate
    fn supported_parameters(&self) -> SessionParameters;
}

/// Factory for secured client or server sockets
///
/// Socket creation itself lives with the I/O layer; the crate only
/// needs the cipher suite surface.
pub trait SocketFactory: Send + Sync {
    /// Cipher suites enabled on new sockets
    fn default_cipher_suites(&self) -> Vec<String>;

    /// Cipher suites the factory can enable
    fn supported_cipher_suites(&self) -> Vec<String>;
}

/// Negotiated session as seen by a hostname verifier
pub trait PeerSession {
    /// Host name of the peer, if known
    fn peer_host(&self) -> Option<&str>;

    /// Negotiated cipher suite
    fn cipher_suite(&self) -> &str;
}

/// Decides whether a host name is acceptable for a session
pub trait HostnameVerifier: Send + Sync {
    fn verify(&self, hostname: &str, session: &dyn PeerSession) -> bool;
}

/// Verifier that accepts no host at all
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAllVerifier;

impl HostnameVerifier for RejectAllVerifier {
    fn verify(&self, hostname: &str, _session: &dyn PeerSession) -> bool {
        log::debug!("Rejecting host {} (no hostname verifier installed)", hostname);
        false
    }
}

/// Provider side of a key or trust manager factory
pub trait ManagerFactorySpi: Send + Sync {
    /// Initialize from key store builder parameters
    fn init(&mut self, params: &KeyStoreBuilderParameters) -> Result<()>;

    /// Managers produced by the factory
    fn managers(&self) -> Result<Vec<ManagerHandle>>;
}
