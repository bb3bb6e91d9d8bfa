/*!
Reconciliation between [`SessionParameters`] and an engine.

Export reads the engine's enabled lists and client authentication mode.
Apply writes back only what the parameters express an opinion on, with
one exception: client authentication is always written, and when
neither need nor want is set the engine's want flag is explicitly
cleared.
*/

use crate::core::error::Result;
use crate::core::params::engine::ConfigurableEngine;
use crate::core::params::parameters::{ClientAuth, SessionParameters};

/// Read the engine's configuration into a parameters record
///
/// Cipher suites and protocols are always present in the result.
/// Endpoint identification, constraints and SNI fields are left unset.
pub fn export_parameters<E>(engine: &E) -> SessionParameters
where
    E: ConfigurableEngine + ?Sized,
{
    let mut params = SessionParameters::new();
    params.set_cipher_suites(Some(engine.enabled_cipher_suites()));
    params.set_protocols(Some(engine.enabled_protocols()));
    if engine.need_client_auth() {
        params.set_need_client_auth(true);
    } else if engine.want_client_auth() {
        params.set_want_client_auth(true);
    }
    params
}

/// Write a parameters record onto the engine
///
/// If the engine rejects the protocol list after the cipher suites were
/// already replaced, the previous cipher suites are restored before the
/// error is returned.
pub fn apply_parameters<E>(engine: &mut E, params: &SessionParameters) -> Result<()>
where
    E: ConfigurableEngine + ?Sized,
{
    let previous_suites = match params.cipher_suites() {
        Some(suites) => {
            let previous = engine.enabled_cipher_suites();
            engine.set_enabled_cipher_suites(suites)?;
            Some(previous)
        }
        None => None,
    };

    if let Some(protocols) = params.protocols() {
        if let Err(err) = engine.set_enabled_protocols(protocols) {
            if let Some(previous) = previous_suites {
                log::warn!("Protocol list rejected ({}), restoring previous cipher suites", err);
                if let Err(restore_err) = engine.set_enabled_cipher_suites(&previous) {
                    log::warn!("Failed to restore cipher suites: {}", restore_err);
                }
            }
            return Err(err);
        }
    }

    match params.client_auth() {
        ClientAuth::Required => engine.set_need_client_auth(true),
        ClientAuth::Requested => engine.set_want_client_auth(true),
        ClientAuth::None => engine.set_want_client_auth(false),
    }
    Ok(())
}
