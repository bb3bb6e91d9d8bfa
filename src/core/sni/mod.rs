/*!
Server Name Indication model.
*/

pub mod host_name;
pub mod matcher;
pub mod server_name;

pub use host_name::SniHostName;
pub use matcher::{build_matcher, ServerNameMatcher, SniMatcher};
pub use server_name::{RawServerName, SniServerName};
