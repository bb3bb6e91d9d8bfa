/*!
Typed SNI server names.

A server name is a type code and an encoded payload. Host names (type
0) get their own representation with case-insensitive equality; every
other type compares structurally.
*/

use std::fmt::{self, Write};

use bytes::Bytes;

use crate::core::constants::sni;
use crate::core::error::Result;
use crate::core::sni::host_name::SniHostName;

/// Write the diagnostic rendering shared by all server names
pub(crate) fn write_name(f: &mut fmt::Formatter<'_>, name_type: u8, encoded: &[u8]) -> fmt::Result {
    if name_type == sni::HOST_NAME {
        f.write_str("type=host_name (0), value=")?;
    } else {
        write!(f, "type=({}), value=", name_type)?;
    }
    for (i, byte) in encoded.iter().enumerate() {
        if i > 0 {
            f.write_char(':')?;
        }
        write!(f, "{:02X}", byte)?;
    }
    Ok(())
}

/// Server name of an arbitrary type with an opaque payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawServerName {
    name_type: u8,
    encoded: Bytes,
}

impl RawServerName {
    /// Create a server name
    ///
    /// Fails with `InvalidArgument` if `name_type` does not fit in one
    /// byte.
    pub fn new(name_type: u32, encoded: impl Into<Bytes>) -> Result<Self> {
        let Ok(name_type) = u8::try_from(name_type) else {
            return crate::invalid_arg!("server name type {} out of range 0..=255", name_type);
        };
        Ok(Self {
            name_type,
            encoded: encoded.into(),
        })
    }

    pub fn name_type(&self) -> u8 {
        self.name_type
    }

    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }
}

impl fmt::Display for RawServerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, self.name_type, &self.encoded)
    }
}

/// An SNI server name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SniServerName {
    /// Type 0 host name, compared case-insensitively
    HostName(SniHostName),
    /// Any other name, compared by type and payload
    Raw(RawServerName),
}

impl SniServerName {
    pub fn name_type(&self) -> u8 {
        match self {
            SniServerName::HostName(_) => sni::HOST_NAME,
            SniServerName::Raw(raw) => raw.name_type(),
        }
    }

    /// Payload as carried in the extension
    pub fn encoded(&self) -> &[u8] {
        match self {
            SniServerName::HostName(host) => host.encoded(),
            SniServerName::Raw(raw) => raw.encoded(),
        }
    }

    pub fn as_host_name(&self) -> Option<&SniHostName> {
        match self {
            SniServerName::HostName(host) => Some(host),
            SniServerName::Raw(_) => None,
        }
    }
}

impl From<SniHostName> for SniServerName {
    fn from(host: SniHostName) -> Self {
        SniServerName::HostName(host)
    }
}

impl From<RawServerName> for SniServerName {
    fn from(raw: RawServerName) -> Self {
        SniServerName::Raw(raw)
    }
}

impl fmt::Display for SniServerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SniServerName::HostName(host) => fmt::Display::fmt(host, f),
            SniServerName::Raw(raw) => fmt::Display::fmt(raw, f),
        }
    }
}
