/*!
Error handling for provider resolution and session configuration.

Every fallible operation in the crate returns [`Result`]. The variants
map one-to-one onto the failure causes callers are expected to tell
apart, so the order in which checks run matters as much as the variant
itself.
*/

use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was absent
    #[error("Required argument is absent: {0}")]
    NullArgument(&'static str),

    /// A present argument violates a structural invariant
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No provider offers the requested service
    #[error("No such algorithm: {algorithm} ({service_type})")]
    NoSuchAlgorithm {
        service_type: String,
        algorithm: String,
    },

    /// A named provider is not registered
    #[error("No such provider: {0}")]
    NoSuchProvider(String),

    /// A constructor or service factory failed
    #[error("Construction failed: {0}")]
    ConstructionFailure(#[source] Box<dyn StdError + Send + Sync>),
}

/// Discriminant of [`Error`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NullArgument,
    InvalidArgument,
    NoSuchAlgorithm,
    NoSuchProvider,
    ConstructionFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NullArgument => write!(f, "NullArgument"),
            ErrorKind::InvalidArgument => write!(f, "InvalidArgument"),
            ErrorKind::NoSuchAlgorithm => write!(f, "NoSuchAlgorithm"),
            ErrorKind::NoSuchProvider => write!(f, "NoSuchProvider"),
            ErrorKind::ConstructionFailure => write!(f, "ConstructionFailure"),
        }
    }
}

impl Error {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NullArgument(_) => ErrorKind::NullArgument,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::NoSuchAlgorithm { .. } => ErrorKind::NoSuchAlgorithm,
            Error::NoSuchProvider(_) => ErrorKind::NoSuchProvider,
            Error::ConstructionFailure(_) => ErrorKind::ConstructionFailure,
        }
    }

    /// Create a `NoSuchAlgorithm` error for a service request
    pub fn no_such_algorithm(service_type: &str, algorithm: &str) -> Self {
        Error::NoSuchAlgorithm {
            service_type: service_type.to_string(),
            algorithm: algorithm.to_string(),
        }
    }

    /// Wrap an arbitrary failure raised by a constructor
    pub fn construction<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error::ConstructionFailure(error.into())
    }
}

/// Create an absent-argument error
#[macro_export]
macro_rules! null_arg {
    ($name:expr) => {
        Err($crate::core::error::Error::NullArgument($name))
    };
}

/// Create an invalid-argument error
#[macro_export]
macro_rules! invalid_arg {
    ($msg:expr) => {
        Err($crate::core::error::Error::InvalidArgument($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::core::error::Error::InvalidArgument(format!($fmt, $($arg)*)))
    };
}

/// Convert from Error to io::Error (for socket-facing callers)
impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::NullArgument(name) => io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Required argument is absent: {}", name),
            ),
            Error::InvalidArgument(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            Error::NoSuchAlgorithm { .. } | Error::NoSuchProvider(_) => {
                io::Error::new(io::ErrorKind::NotFound, error.to_string())
            }
            Error::ConstructionFailure(source) => io::Error::other(source),
        }
    }
}
