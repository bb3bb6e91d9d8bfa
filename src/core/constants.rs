/*!
Constants shared across the crate.

Service type names, well-known algorithm names, configuration property
keys and SNI type codes.
*/

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service type names under which providers register implementations
pub mod service_types {
    /// Security context factories
    pub const SSL_CONTEXT: &str = "SSLContext";

    /// Key manager factories
    pub const KEY_MANAGER_FACTORY: &str = "KeyManagerFactory";

    /// Trust manager factories
    pub const TRUST_MANAGER_FACTORY: &str = "TrustManagerFactory";
}

/// Well-known algorithm names
pub mod algorithms {
    /// Protocol name used to build the default security context
    pub const DEFAULT_CONTEXT: &str = "Default";

    /// Fallback key/trust manager algorithm when none is configured
    pub const FALLBACK_MANAGER: &str = "SunX509";
}

/// Property keys read by [`crate::SecurityConfig::from_properties`]
pub mod properties {
    /// Default key manager factory algorithm
    pub const KEY_MANAGER_ALGORITHM: &str = "ssl.KeyManagerFactory.algorithm";

    /// Default trust manager factory algorithm
    pub const TRUST_MANAGER_ALGORITHM: &str = "ssl.TrustManagerFactory.algorithm";
}

/// Environment variables read by [`crate::SecurityConfig::from_env`]
pub mod env {
    pub const KEY_MANAGER_ALGORITHM: &str = "TLS_KEY_MANAGER_ALGORITHM";
    pub const TRUST_MANAGER_ALGORITHM: &str = "TLS_TRUST_MANAGER_ALGORITHM";
    pub const DEFAULT_CONTEXT_PROTOCOL: &str = "TLS_DEFAULT_CONTEXT_PROTOCOL";
}

/// SNI server name type codes
pub mod sni {
    /// Host name server name type
    pub const HOST_NAME: u8 = 0x00;
}
