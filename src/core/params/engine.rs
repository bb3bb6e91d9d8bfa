/*!
Discrete configuration surface of an engine or socket.

Handshake and record processing belong to the implementation; this
trait only covers the knobs session parameters are reconciled against.
*/

use crate::core::error::Result;
use crate::core::params::parameters::{ClientAuth, SessionParameters};
use crate::core::params::reconcile::{apply_parameters, export_parameters};

/// Engine or socket whose configuration can be read and written
pub trait ConfigurableEngine: Send {
    /// Cipher suites the engine can enable
    fn supported_cipher_suites(&self) -> Vec<String>;

    /// Cipher suites currently enabled
    fn enabled_cipher_suites(&self) -> Vec<String>;

    /// Replace the enabled cipher suites
    fn set_enabled_cipher_suites(&mut self, suites: &[String]) -> Result<()>;

    /// Protocol versions the engine can enable
    fn supported_protocols(&self) -> Vec<String>;

    /// Protocol versions currently enabled
    fn enabled_protocols(&self) -> Vec<String>;

    /// Replace the enabled protocol versions
    fn set_enabled_protocols(&mut self, protocols: &[String]) -> Result<()>;

    /// Whether client authentication is required
    fn need_client_auth(&self) -> bool;

    /// Require (or stop requiring) client authentication
    ///
    /// Setting this replaces any previous want setting.
    fn set_need_client_auth(&mut self, need: bool);

    /// Whether client authentication is requested
    fn want_client_auth(&self) -> bool;

    /// Request (or stop requesting) client authentication
    ///
    /// Setting this replaces any previous need setting.
    fn set_want_client_auth(&mut self, want: bool);

    /// Whether the engine handshakes as the client
    fn use_client_mode(&self) -> bool;

    /// Choose the client or server role
    ///
    /// Fails once the role is fixed, typically after the handshake has
    /// started.
    fn set_use_client_mode(&mut self, client_mode: bool) -> Result<()>;

    /// Whether new sessions may be established
    ///
    /// When false only existing sessions can be resumed.
    fn enable_session_creation(&self) -> bool;

    /// Allow or forbid establishing new sessions
    fn set_enable_session_creation(&mut self, enabled: bool);

    /// Host of the peer, when the engine was created for one
    fn peer_host(&self) -> Option<&str> {
        None
    }

    /// Port of the peer, when the engine was created for one
    fn peer_port(&self) -> Option<u16> {
        None
    }

    /// Current client authentication mode
    fn client_auth(&self) -> ClientAuth {
        ClientAuth::from_flags(self.need_client_auth(), self.want_client_auth())
    }

    /// Snapshot of the engine configuration
    fn session_parameters(&self) -> SessionParameters {
        export_parameters(self)
    }

    /// Apply session parameters to the engine
    fn set_session_parameters(&mut self, params: &SessionParameters) -> Result<()> {
        apply_parameters(self, params)
    }
}
