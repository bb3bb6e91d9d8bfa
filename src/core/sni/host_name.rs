/*!
SNI host names.

The ASCII form is computed once at construction, label by label:
all-ASCII labels keep the caller's spelling and other labels are
converted to punycode. Display uses the ASCII form as-is; equality and
hashing use its upper-cased form, so names that differ only in letter
case are the same host.
*/

use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::Bytes;

use crate::core::error::{Error, Result};
use crate::core::sni::matcher::{build_matcher, SniMatcher};

const MAX_LABEL_LEN: usize = 63;

// Full stop and its ideographic and full-width variants
fn is_separator(c: char) -> bool {
    matches!(c, '.' | '\u{3002}' | '\u{FF0E}' | '\u{FF61}')
}

// Letters, digits and hyphens, no hyphen at either end
fn check_ldh(label: &str, name: &str) -> Result<()> {
    if !label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return crate::invalid_arg!(
            "label {:?} of host name {:?} may only contain letters, digits and hyphens",
            label,
            name
        );
    }
    if label.starts_with('-') || label.ends_with('-') {
        return crate::invalid_arg!(
            "label {:?} of host name {:?} starts or ends with a hyphen",
            label,
            name
        );
    }
    Ok(())
}

/// Convert a host name to its ASCII form
///
/// All-ASCII labels are kept as written; with `std3` they must also be
/// LDH labels. Other labels go through IDNA. Every label is limited to
/// 63 bytes, the name as a whole is not. A trailing separator is kept.
pub(crate) fn to_ascii(name: &str, std3: bool) -> Result<String> {
    let labels: Vec<&str> = name.split(is_separator).collect();
    let last = labels.len() - 1;
    let mut converted = Vec::with_capacity(labels.len());
    for (index, label) in labels.into_iter().enumerate() {
        if label.is_empty() {
            if index == last {
                converted.push(String::new());
                continue;
            }
            return crate::invalid_arg!("host name {:?} contains an empty label", name);
        }
        let ascii = if label.is_ascii() {
            if std3 {
                check_ldh(label, name)?;
            }
            label.to_string()
        } else {
            let result = if std3 {
                idna::domain_to_ascii_strict(label)
            } else {
                idna::domain_to_ascii(label)
            };
            result.map_err(|_| {
                Error::InvalidArgument(format!(
                    "label {:?} of host name {:?} is not a valid internationalized label",
                    label, name
                ))
            })?
        };
        if ascii.len() > MAX_LABEL_LEN {
            return crate::invalid_arg!(
                "label {:?} of host name {:?} is longer than {} bytes",
                label,
                name,
                MAX_LABEL_LEN
            );
        }
        converted.push(ascii);
    }
    Ok(converted.join("."))
}

/// Convert an ASCII host name to Unicode
///
/// Only punycode labels are decoded; a label that fails to decode is
/// kept as it is.
pub(crate) fn to_unicode(ascii: &str) -> String {
    ascii
        .split('.')
        .map(|label| {
            let is_punycode = label.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("xn--"));
            if is_punycode {
                if let (unicode, Ok(())) = idna::domain_to_unicode(label) {
                    return unicode;
                }
            }
            label.to_string()
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// A type 0 (host name) server name
#[derive(Debug, Clone)]
pub struct SniHostName {
    ascii: String,
    key: String,
    encoded: Bytes,
}

impl SniHostName {
    /// Create a host name from text
    ///
    /// The name is converted to ASCII with STD3 rules. Fails with
    /// `InvalidArgument` if conversion fails or the result is empty or
    /// ends with a dot.
    pub fn from_name(name: &str) -> Result<Self> {
        let ascii = to_ascii(name, true)?;
        let encoded = Bytes::from(ascii.clone().into_bytes());
        Self::validated(ascii, encoded)
    }

    /// Create a host name from its encoded form
    ///
    /// The bytes are read as UTF-8 and converted to ASCII without the
    /// STD3 restrictions. The original bytes are kept as the encoded
    /// payload.
    pub fn from_bytes(encoded: impl Into<Bytes>) -> Result<Self> {
        let encoded = encoded.into();
        let text = std::str::from_utf8(&encoded)
            .map_err(|e| Error::InvalidArgument(format!("host name is not UTF-8: {}", e)))?;
        let ascii = to_ascii(text, false)?;
        Self::validated(ascii, encoded)
    }

    fn validated(ascii: String, encoded: Bytes) -> Result<Self> {
        if ascii.is_empty() {
            return crate::invalid_arg!("host name must not be empty");
        }
        if ascii.ends_with('.') {
            return crate::invalid_arg!("host name {:?} must not end with a dot", ascii);
        }
        let key = ascii.to_ascii_uppercase();
        Ok(Self { ascii, key, encoded })
    }

    /// ASCII (IDNA) form of the name
    pub fn ascii_name(&self) -> &str {
        &self.ascii
    }

    /// Human-readable (Unicode) form of the name
    pub fn unicode_name(&self) -> String {
        to_unicode(&self.ascii)
    }

    /// Payload as carried in the extension
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Build a matcher that tests host names against `pattern`
    pub fn build_matcher(pattern: &str) -> Result<SniMatcher> {
        build_matcher(pattern)
    }
}

impl PartialEq for SniHostName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SniHostName {}

impl Hash for SniHostName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for SniHostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type=host_name (0), value={}", self.ascii)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(name: &SniHostName) -> u64 {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_case_insensitive_equality() {
        let a = SniHostName::from_name("Example.COM").unwrap();
        let b = SniHostName::from_name("example.com").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "example.com.", "exa mple.com", "-example.com"] {
            let err = SniHostName::from_name(name).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{:?}", name);
        }
    }

    #[test]
    fn test_display() {
        let name = SniHostName::from_name("www.example.com").unwrap();
        assert_eq!(name.to_string(), "type=host_name (0), value=www.example.com");
        assert_eq!(name.encoded(), b"www.example.com");
    }

    #[test]
    fn test_ascii_labels_keep_their_case() {
        let name = SniHostName::from_name("WWW.Example.COM").unwrap();
        assert_eq!(name.to_string(), "type=host_name (0), value=WWW.Example.COM");
        assert_eq!(name.ascii_name(), "WWW.Example.COM");
        assert_eq!(name.encoded(), b"WWW.Example.COM");
        assert_eq!(name, SniHostName::from_name("www.example.com").unwrap());

        let name = SniHostName::from_name("Bücher.Example").unwrap();
        assert_eq!(name.ascii_name(), "xn--bcher-kva.Example");
        assert_eq!(name.unicode_name(), "bücher.Example");
    }

    #[test]
    fn test_only_labels_are_length_limited() {
        let label = "a".repeat(60);
        let long = vec![label.as_str(); 5].join(".");
        assert_eq!(long.len(), 304);
        let name = SniHostName::from_name(&long).unwrap();
        assert_eq!(name.ascii_name(), long);

        let err = SniHostName::from_name(&format!("{}.example", "b".repeat(64))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("longer than 63 bytes"));
    }

    #[test]
    fn test_error_messages_name_the_cause() {
        let err = SniHostName::from_name("a..example").unwrap_err();
        assert!(err.to_string().contains("empty label"), "{}", err);

        let err = SniHostName::from_name("under_score.example").unwrap_err();
        assert!(err.to_string().contains("letters, digits and hyphens"), "{}", err);
        assert!(!err.to_string().contains("Errors"));
    }

    #[test]
    fn test_internationalized_name() {
        let name = SniHostName::from_name("bücher.example").unwrap();
        assert_eq!(name.ascii_name(), "xn--bcher-kva.example");
        assert_eq!(name.unicode_name(), "bücher.example");
        assert_eq!(name.encoded(), b"xn--bcher-kva.example");
    }

    #[test]
    fn test_from_bytes_keeps_payload() {
        let name = SniHostName::from_bytes("bücher.example".as_bytes().to_vec()).unwrap();
        assert_eq!(name.ascii_name(), "xn--bcher-kva.example");
        assert_eq!(name.encoded(), "bücher.example".as_bytes());
        assert_eq!(name, SniHostName::from_name("BÜCHER.example").unwrap());
    }

    #[test]
    fn test_from_bytes_validation() {
        let err = SniHostName::from_bytes(&b"example.com."[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = SniHostName::from_bytes(vec![0xffu8, 0xfe]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = SniHostName::from_bytes(Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
