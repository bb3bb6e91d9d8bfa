//! Core components of the crate.
//!
//! Provider resolution, process defaults, session parameter
//! reconciliation and the SNI model, plus the error and configuration
//! types they share.

// Provider registry and algorithm resolution
pub mod provider;

// Typed facades over resolved services
pub mod context;

// Lazily constructed process defaults
pub mod defaults;

// Session parameters and engine reconciliation
pub mod params;

// Server Name Indication
pub mod sni;

// Runtime configuration
pub mod config;

// Shared constants
pub mod constants;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::config::SecurityConfig;
pub use self::error::{Error, ErrorKind, Result};
