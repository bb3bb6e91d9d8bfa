/*!
SNI matchers.

A matcher pairs a server name type with a predicate. Matchers have
identity semantics: clones of one matcher are equal, two matchers built
separately never are, even from the same pattern.
*/

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::core::constants::sni;
use crate::core::error::{Error, Result};
use crate::core::sni::host_name::{to_ascii, to_unicode};
use crate::core::sni::server_name::SniServerName;

/// Predicate over candidate server names
pub trait ServerNameMatcher: Send + Sync {
    fn matches(&self, name: &SniServerName) -> bool;
}

struct FnMatcher<F>(F);

impl<F> ServerNameMatcher for FnMatcher<F>
where
    F: Fn(&SniServerName) -> bool + Send + Sync,
{
    fn matches(&self, name: &SniServerName) -> bool {
        (self.0)(name)
    }
}

/// A server name type together with a matching predicate
#[derive(Clone)]
pub struct SniMatcher {
    name_type: u8,
    inner: Arc<dyn ServerNameMatcher>,
}

impl SniMatcher {
    pub fn new<M>(name_type: u8, matcher: M) -> Self
    where
        M: ServerNameMatcher + 'static,
    {
        Self {
            name_type,
            inner: Arc::new(matcher),
        }
    }

    /// Create a matcher from a closure
    pub fn from_fn<F>(name_type: u8, predicate: F) -> Self
    where
        F: Fn(&SniServerName) -> bool + Send + Sync + 'static,
    {
        Self::new(name_type, FnMatcher(predicate))
    }

    /// Server name type this matcher applies to
    pub fn name_type(&self) -> u8 {
        self.name_type
    }

    pub fn matches(&self, name: &SniServerName) -> bool {
        self.inner.matches(name)
    }

    fn identity(&self) -> *const () {
        Arc::as_ptr(&self.inner) as *const ()
    }
}

impl PartialEq for SniMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for SniMatcher {}

impl Hash for SniMatcher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Debug for SniMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SniMatcher")
            .field("name_type", &self.name_type)
            .field("identity", &self.identity())
            .finish()
    }
}

/// Host name matcher backed by a case-insensitive pattern
struct HostNamePattern {
    pattern: Regex,
}

impl HostNamePattern {
    fn ascii_form<'a>(name: &'a SniServerName) -> Option<Cow<'a, str>> {
        if let Some(host) = name.as_host_name() {
            return Some(Cow::Borrowed(host.ascii_name()));
        }
        // Other payloads are decoded permissively; any failure is a miss.
        let text = String::from_utf8_lossy(name.encoded());
        to_ascii(&text, false).ok().map(Cow::Owned)
    }
}

impl ServerNameMatcher for HostNamePattern {
    fn matches(&self, name: &SniServerName) -> bool {
        let Some(ascii) = Self::ascii_form(name) else {
            log::trace!("No ASCII form for {}, not matching", name);
            return false;
        };
        if self.pattern.is_match(&ascii) {
            return true;
        }
        self.pattern.is_match(&to_unicode(&ascii))
    }
}

/// Build a host name matcher from a regular expression
///
/// The pattern is case-insensitive and must match the whole name, in
/// either its ASCII or its Unicode form. An invalid pattern fails with
/// `InvalidArgument`.
pub fn build_matcher(pattern: &str) -> Result<SniMatcher> {
    let anchored = format!("^(?:{})$", pattern);
    let pattern = RegexBuilder::new(&anchored)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::InvalidArgument(format!("invalid SNI pattern: {}", e)))?;
    Ok(SniMatcher::new(sni::HOST_NAME, HostNamePattern { pattern }))
}
