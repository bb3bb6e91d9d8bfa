// Shared fixtures: an in-memory context, engine and manager factory.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tls_provider_core::{
    invalid_arg, service_types, ConfigurableEngine, ContextSpi, KeyStoreBuilderParameters,
    ManagerFactorySpi, ManagerHandle, Provider, Result, SessionParameters, SocketFactory,
    StaticProvider,
};

pub const SUITES: [&str; 3] = [
    "TLS_AES_128_GCM_SHA256",
    "TLS_AES_256_GCM_SHA384",
    "TLS_CHACHA20_POLY1305_SHA256",
];
pub const PROTOCOLS: [&str; 2] = ["TLSv1.2", "TLSv1.3"];

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub struct MockSocketFactory {
    pub origin: String,
}

impl SocketFactory for MockSocketFactory {
    fn default_cipher_suites(&self) -> Vec<String> {
        strings(&SUITES[..2])
    }

    fn supported_cipher_suites(&self) -> Vec<String> {
        strings(&SUITES)
    }
}

/// Engine that records setter calls and only accepts known names
pub struct MockEngine {
    pub peer: Option<(String, u16)>,
    pub suites: Vec<String>,
    pub protocols: Vec<String>,
    pub need: bool,
    pub want: bool,
    pub client_mode: bool,
    pub session_creation: bool,
    pub role_fixed: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockEngine {
    pub fn new(peer: Option<(&str, u16)>) -> Self {
        Self {
            peer: peer.map(|(host, port)| (host.to_string(), port)),
            suites: strings(&SUITES[..2]),
            protocols: strings(&PROTOCOLS),
            need: false,
            want: false,
            client_mode: false,
            session_creation: true,
            role_fixed: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ConfigurableEngine for MockEngine {
    fn supported_cipher_suites(&self) -> Vec<String> {
        strings(&SUITES)
    }

    fn enabled_cipher_suites(&self) -> Vec<String> {
        self.suites.clone()
    }

    fn set_enabled_cipher_suites(&mut self, suites: &[String]) -> Result<()> {
        if let Some(unknown) = suites.iter().find(|s| !SUITES.contains(&s.as_str())) {
            return invalid_arg!("unsupported cipher suite {}", unknown);
        }
        self.record(format!("suites({})", suites.join(",")));
        self.suites = suites.to_vec();
        Ok(())
    }

    fn supported_protocols(&self) -> Vec<String> {
        strings(&PROTOCOLS)
    }

    fn enabled_protocols(&self) -> Vec<String> {
        self.protocols.clone()
    }

    fn set_enabled_protocols(&mut self, protocols: &[String]) -> Result<()> {
        if let Some(unknown) = protocols.iter().find(|p| !PROTOCOLS.contains(&p.as_str())) {
            return invalid_arg!("unsupported protocol {}", unknown);
        }
        self.record(format!("protocols({})", protocols.join(",")));
        self.protocols = protocols.to_vec();
        Ok(())
    }

    fn need_client_auth(&self) -> bool {
        self.need
    }

    fn set_need_client_auth(&mut self, need: bool) {
        self.record(format!("need({})", need));
        self.need = need;
        self.want = false;
    }

    fn want_client_auth(&self) -> bool {
        self.want
    }

    fn set_want_client_auth(&mut self, want: bool) {
        self.record(format!("want({})", want));
        self.want = want;
        self.need = false;
    }

    fn use_client_mode(&self) -> bool {
        self.client_mode
    }

    fn set_use_client_mode(&mut self, client_mode: bool) -> Result<()> {
        if self.role_fixed && client_mode != self.client_mode {
            return invalid_arg!("cannot change the role after the handshake started");
        }
        self.record(format!("client_mode({})", client_mode));
        self.client_mode = client_mode;
        Ok(())
    }

    fn enable_session_creation(&self) -> bool {
        self.session_creation
    }

    fn set_enable_session_creation(&mut self, enabled: bool) {
        self.record(format!("session_creation({})", enabled));
        self.session_creation = enabled;
    }

    fn peer_host(&self) -> Option<&str> {
        self.peer.as_ref().map(|(host, _)| host.as_str())
    }

    fn peer_port(&self) -> Option<u16> {
        self.peer.as_ref().map(|(_, port)| *port)
    }
}

/// Context whose server side needs `init` before use
pub struct MockContext {
    pub origin: String,
    pub key_managers: Vec<ManagerHandle>,
    pub trust_managers: Vec<ManagerHandle>,
    pub initialized: bool,
}

impl MockContext {
    pub fn boxed(origin: &str) -> Box<dyn ContextSpi> {
        Box::new(Self {
            origin: origin.to_string(),
            key_managers: Vec::new(),
            trust_managers: Vec::new(),
            initialized: false,
        })
    }
}

impl ContextSpi for MockContext {
    fn init(&mut self, key_managers: &[ManagerHandle], trust_managers: &[ManagerHandle]) -> Result<()> {
        self.key_managers = key_managers.to_vec();
        self.trust_managers = trust_managers.to_vec();
        self.initialized = true;
        Ok(())
    }

    fn socket_factory(&self) -> Result<Arc<dyn SocketFactory>> {
        Ok(Arc::new(MockSocketFactory {
            origin: self.origin.clone(),
        }))
    }

    fn server_socket_factory(&self) -> Result<Arc<dyn SocketFactory>> {
        if !self.initialized {
            return invalid_arg!("context not initialized");
        }
        if self.key_managers.is_empty() {
            return invalid_arg!("server sockets need a key manager");
        }
        Ok(Arc::new(MockSocketFactory {
            origin: format!("{}/server", self.origin),
        }))
    }

    fn create_engine(&self, peer: Option<(&str, u16)>) -> Result<Box<dyn ConfigurableEngine>> {
        Ok(Box::new(MockEngine::new(peer)))
    }

    fn default_parameters(&self) -> SessionParameters {
        SessionParameters::with_suites_and_protocols(strings(&SUITES[..2]), strings(&PROTOCOLS))
    }

    fn supported_parameters(&self) -> SessionParameters {
        SessionParameters::with_suites_and_protocols(strings(&SUITES), strings(&PROTOCOLS))
    }
}

/// Manager factory that hands out one handle per key store builder
#[derive(Default)]
pub struct MockManagerFactory {
    handles: Vec<ManagerHandle>,
}

impl MockManagerFactory {
    pub fn boxed() -> Box<dyn ManagerFactorySpi> {
        Box::new(Self::default())
    }
}

impl ManagerFactorySpi for MockManagerFactory {
    fn init(&mut self, params: &KeyStoreBuilderParameters) -> Result<()> {
        self.handles = params.builders().to_vec();
        Ok(())
    }

    fn managers(&self) -> Result<Vec<ManagerHandle>> {
        if self.handles.is_empty() {
            return invalid_arg!("factory not initialized");
        }
        Ok(self.handles.clone())
    }
}

/// Provider offering contexts for `protocols` and both manager factories
pub fn context_provider(name: &str, protocols: &[&str]) -> StaticProvider {
    let mut provider = StaticProvider::new(name);
    for protocol in protocols {
        let origin = format!("{}/{}", name, protocol);
        provider = provider.with_service(service_types::SSL_CONTEXT, protocol, move || {
            Ok(MockContext::boxed(&origin))
        });
    }
    provider
        .with_service(service_types::KEY_MANAGER_FACTORY, "SunX509", || {
            Ok(MockManagerFactory::boxed())
        })
        .with_service(service_types::TRUST_MANAGER_FACTORY, "SunX509", || {
            Ok(MockManagerFactory::boxed())
        })
}

/// Provider whose default context counts its constructions
pub fn counting_provider(name: &str, counter: Arc<AtomicUsize>) -> Arc<dyn Provider> {
    let origin = name.to_string();
    StaticProvider::new(name)
        .with_service(service_types::SSL_CONTEXT, "Default", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(MockContext::boxed(&origin))
        })
        .into_arc()
}
