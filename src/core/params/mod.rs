/*!
Session parameters and their reconciliation with engines.
*/

pub mod engine;
pub mod parameters;
pub mod reconcile;

pub use engine::ConfigurableEngine;
pub use parameters::{AlgorithmConstraints, ClientAuth, SessionParameters};
pub use reconcile::{apply_parameters, export_parameters};
