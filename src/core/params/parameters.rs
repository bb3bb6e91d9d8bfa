/*!
Session parameters record.

Every list field is tri-state: `None` means "no opinion", an empty list
means "explicitly none", anything else is an explicit selection.
*/

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::sni::{SniMatcher, SniServerName};

/// Opaque algorithm constraints policy
pub type AlgorithmConstraints = Arc<dyn Any + Send + Sync>;

/// Client authentication mode derived from the need/want flag pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuth {
    /// No client authentication
    None,
    /// Client authentication requested but optional
    Requested,
    /// Client authentication required
    Required,
}

impl ClientAuth {
    /// Resolve the flag pair; `need` wins over `want`
    pub fn from_flags(need: bool, want: bool) -> Self {
        if need {
            ClientAuth::Required
        } else if want {
            ClientAuth::Requested
        } else {
            ClientAuth::None
        }
    }
}

impl fmt::Display for ClientAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientAuth::None => write!(f, "none"),
            ClientAuth::Requested => write!(f, "requested"),
            ClientAuth::Required => write!(f, "required"),
        }
    }
}

/// Generic session configuration
#[derive(Debug, Clone, Default)]
pub struct SessionParameters {
    cipher_suites: Option<Vec<String>>,
    protocols: Option<Vec<String>>,
    want_client_auth: bool,
    need_client_auth: bool,
    endpoint_identification_algorithm: Option<String>,
    algorithm_constraints: Option<AlgorithmConstraints>,
    server_names: Option<Vec<SniServerName>>,
    sni_matchers: Option<Vec<SniMatcher>>,
    use_cipher_suites_order: bool,
}

// Rejects absent and duplicate elements without touching the target.
fn checked_set<T>(items: Option<Vec<Option<T>>>, what: &'static str) -> Result<Option<Vec<T>>>
where
    T: Eq + Hash,
{
    let Some(items) = items else {
        return Ok(None);
    };
    {
        let mut seen = HashSet::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let Some(item) = item else {
                return crate::null_arg!(what);
            };
            if !seen.insert(item) {
                return crate::invalid_arg!("duplicate {} at index {}", what, index);
            }
        }
    }
    Ok(Some(items.into_iter().flatten().collect()))
}

impl SessionParameters {
    /// Create parameters with no opinion on anything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters selecting cipher suites and protocols
    pub fn with_suites_and_protocols(cipher_suites: Vec<String>, protocols: Vec<String>) -> Self {
        Self {
            cipher_suites: Some(cipher_suites),
            protocols: Some(protocols),
            ..Self::default()
        }
    }

    pub fn cipher_suites(&self) -> Option<&[String]> {
        self.cipher_suites.as_deref()
    }

    pub fn set_cipher_suites(&mut self, cipher_suites: Option<Vec<String>>) {
        self.cipher_suites = cipher_suites;
    }

    /// Builder form of [`SessionParameters::set_cipher_suites`]
    pub fn with_cipher_suites<I, S>(mut self, cipher_suites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cipher_suites = Some(cipher_suites.into_iter().map(Into::into).collect());
        self
    }

    pub fn protocols(&self) -> Option<&[String]> {
        self.protocols.as_deref()
    }

    pub fn set_protocols(&mut self, protocols: Option<Vec<String>>) {
        self.protocols = protocols;
    }

    /// Builder form of [`SessionParameters::set_protocols`]
    pub fn with_protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocols = Some(protocols.into_iter().map(Into::into).collect());
        self
    }

    pub fn want_client_auth(&self) -> bool {
        self.want_client_auth
    }

    pub fn set_want_client_auth(&mut self, want: bool) {
        self.want_client_auth = want;
    }

    pub fn need_client_auth(&self) -> bool {
        self.need_client_auth
    }

    pub fn set_need_client_auth(&mut self, need: bool) {
        self.need_client_auth = need;
    }

    /// Effective client authentication mode
    pub fn client_auth(&self) -> ClientAuth {
        ClientAuth::from_flags(self.need_client_auth, self.want_client_auth)
    }

    pub fn endpoint_identification_algorithm(&self) -> Option<&str> {
        self.endpoint_identification_algorithm.as_deref()
    }

    pub fn set_endpoint_identification_algorithm(&mut self, algorithm: Option<String>) {
        self.endpoint_identification_algorithm = algorithm;
    }

    pub fn algorithm_constraints(&self) -> Option<&AlgorithmConstraints> {
        self.algorithm_constraints.as_ref()
    }

    pub fn set_algorithm_constraints(&mut self, constraints: Option<AlgorithmConstraints>) {
        self.algorithm_constraints = constraints;
    }

    pub fn use_cipher_suites_order(&self) -> bool {
        self.use_cipher_suites_order
    }

    pub fn set_use_cipher_suites_order(&mut self, honor: bool) {
        self.use_cipher_suites_order = honor;
    }

    pub fn server_names(&self) -> Option<&[SniServerName]> {
        self.server_names.as_deref()
    }

    /// Set the SNI server names, preserving order
    ///
    /// An absent element fails with `NullArgument` and a duplicate with
    /// `InvalidArgument`; on failure the current names are kept.
    pub fn set_server_names(&mut self, names: Option<Vec<Option<SniServerName>>>) -> Result<()> {
        self.server_names = checked_set(names, "server name")?;
        Ok(())
    }

    /// Builder form of [`SessionParameters::set_server_names`]
    pub fn with_server_names(mut self, names: Vec<SniServerName>) -> Result<Self> {
        self.set_server_names(Some(names.into_iter().map(Some).collect()))?;
        Ok(self)
    }

    pub fn sni_matchers(&self) -> Option<&[SniMatcher]> {
        self.sni_matchers.as_deref()
    }

    /// Set the SNI matchers
    ///
    /// Same validation as [`SessionParameters::set_server_names`].
    pub fn set_sni_matchers(&mut self, matchers: Option<Vec<Option<SniMatcher>>>) -> Result<()> {
        self.sni_matchers = checked_set(matchers, "SNI matcher")?;
        Ok(())
    }

    /// Builder form of [`SessionParameters::set_sni_matchers`]
    pub fn with_sni_matchers(mut self, matchers: Vec<SniMatcher>) -> Result<Self> {
        self.set_sni_matchers(Some(matchers.into_iter().map(Some).collect()))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::sni::{SniHostName, build_matcher};

    fn host(name: &str) -> SniServerName {
        SniHostName::from_name(name).unwrap().into()
    }

    #[test]
    fn test_defaults() {
        let params = SessionParameters::new();
        assert!(params.cipher_suites().is_none());
        assert!(params.protocols().is_none());
        assert!(params.server_names().is_none());
        assert!(params.sni_matchers().is_none());
        assert!(!params.want_client_auth());
        assert!(!params.need_client_auth());
        assert!(!params.use_cipher_suites_order());
        assert_eq!(params.client_auth(), ClientAuth::None);
    }

    #[test]
    fn test_tri_state_lists() {
        let params = SessionParameters::new().with_cipher_suites(Vec::<String>::new());
        assert_eq!(params.cipher_suites(), Some(&[][..]));

        let mut params = SessionParameters::with_suites_and_protocols(
            vec!["TLS_AES_128_GCM_SHA256".into()],
            vec!["TLSv1.3".into()],
        );
        assert_eq!(params.protocols().unwrap(), ["TLSv1.3"]);
        params.set_protocols(None);
        assert!(params.protocols().is_none());
    }

    #[test]
    fn test_client_auth_precedence() {
        assert_eq!(ClientAuth::from_flags(true, true), ClientAuth::Required);
        assert_eq!(ClientAuth::from_flags(true, false), ClientAuth::Required);
        assert_eq!(ClientAuth::from_flags(false, true), ClientAuth::Requested);
        assert_eq!(ClientAuth::from_flags(false, false), ClientAuth::None);
    }

    #[test]
    fn test_server_names_keep_order() {
        let params = SessionParameters::new()
            .with_server_names(vec![host("b.example"), host("a.example")])
            .unwrap();
        let names: Vec<String> = params
            .server_names()
            .unwrap()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "type=host_name (0), value=b.example",
                "type=host_name (0), value=a.example"
            ]
        );
    }

    #[test]
    fn test_server_names_duplicates_rejected() {
        let err = SessionParameters::new()
            .with_server_names(vec![host("example.com"), host("EXAMPLE.com")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_server_names_absent_element_rejected() {
        let mut params = SessionParameters::new()
            .with_server_names(vec![host("keep.example")])
            .unwrap();
        let err = params
            .set_server_names(Some(vec![Some(host("example.com")), None]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullArgument);
        assert_eq!(params.server_names().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_and_cleared_server_names() {
        let mut params = SessionParameters::new();
        params.set_server_names(Some(Vec::new())).unwrap();
        assert_eq!(params.server_names().map(<[_]>::len), Some(0));
        params.set_server_names(None).unwrap();
        assert!(params.server_names().is_none());
    }

    #[test]
    fn test_matchers_identity() {
        let matcher = build_matcher(r"www\.example\.com").unwrap();
        let other = build_matcher(r"www\.example\.com").unwrap();

        let err = SessionParameters::new()
            .with_sni_matchers(vec![matcher.clone(), matcher.clone()])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let params = SessionParameters::new()
            .with_sni_matchers(vec![matcher, other])
            .unwrap();
        assert_eq!(params.sni_matchers().unwrap().len(), 2);
    }
}
