#![forbid(unsafe_code)]

use std::fmt;
use std::hash::{Hash, Hasher};

use url::Url;

use crate::error::{CoreError, CoreResult};

/// Normalized identifier for a fetchable remote image.
///
/// Construction canonicalizes the location text so that trivially different
/// spellings of one resource collapse onto one key:
/// - fragment removed (never sent to the server),
/// - query preserved (different query means a different resource),
/// - scheme and host lowercased,
/// - default ports removed (80 for HTTP, 443 for HTTPS).
///
/// Equality and hashing are exact string equality on the canonical text, so
/// two callers requesting the same normalized key share one fetch.
#[derive(Clone, Debug)]
pub struct ImageKey {
    canonical: String,
    url: Url,
}

impl ImageKey {
    /// Parse and normalize a location string into a key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLocation`] for unparseable text and
    /// [`CoreError::MissingComponent`] for locations without a host.
    pub fn parse(location: &str) -> CoreResult<Self> {
        let url = Url::parse(location)
            .map_err(|e| CoreError::InvalidLocation(format!("{location}: {e}")))?;
        Self::from_url(&url)
    }

    /// Build a key from an already-parsed URL.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingComponent`] if the URL lacks a host.
    pub fn from_url(url: &Url) -> CoreResult<Self> {
        if url.host().is_none() {
            return Err(CoreError::MissingComponent("host".to_string()));
        }

        let mut canonical = url.clone();

        // Remove fragment, keep query: two URLs that differ only in query
        // address different resources.
        canonical.set_fragment(None);

        // Normalize scheme and host to lowercase
        let scheme = canonical.scheme();
        let scheme_lower = scheme.to_lowercase();
        if scheme != scheme_lower {
            let _ = canonical.set_scheme(&scheme_lower);
        }

        if let Some(host) = canonical.host_str() {
            let host_lower = host.to_lowercase();
            if host != host_lower {
                let _ = canonical.set_host(Some(&host_lower));
            }
        }

        // Remove default ports
        match (canonical.scheme(), canonical.port()) {
            ("https", Some(443)) | ("http", Some(80)) => {
                let _ = canonical.set_port(None);
            }
            _ => {}
        }

        Ok(Self {
            canonical: canonical.to_string(),
            url: canonical,
        })
    }

    /// The canonical location text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The canonicalized URL, for handing to the transport layer.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PartialEq for ImageKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for ImageKey {}

impl Hash for ImageKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        "https://example.com/flag.png#section",
        "https://example.com/flag.png",
        "fragment is removed"
    )]
    #[case(
        "HTTPS://EXAMPLE.COM/flag.png",
        "https://example.com/flag.png",
        "scheme and host are lowercased"
    )]
    #[case(
        "https://example.com:443/flag.png",
        "https://example.com/flag.png",
        "default HTTPS port is removed"
    )]
    #[case(
        "http://example.com:80/flag.png",
        "http://example.com/flag.png",
        "default HTTP port is removed"
    )]
    #[case(
        "https://example.com:8443/flag.png",
        "https://example.com:8443/flag.png",
        "non-default port is preserved"
    )]
    #[case(
        "https://example.com/flag.png?size=64",
        "https://example.com/flag.png?size=64",
        "query is preserved"
    )]
    fn canonicalizes_locations(
        #[case] input: &str,
        #[case] expected: &str,
        #[case] description: &str,
    ) {
        let key = ImageKey::parse(input).unwrap();
        assert_eq!(key.as_str(), expected, "{}", description);
    }

    #[rstest]
    #[case(
        "https://example.com/flag.png?size=64",
        "https://example.com/flag.png?size=128"
    )]
    #[case("https://example.com/a.png", "https://example.com/b.png")]
    fn distinct_resources_get_distinct_keys(#[case] a: &str, #[case] b: &str) {
        let ka = ImageKey::parse(a).unwrap();
        let kb = ImageKey::parse(b).unwrap();
        assert_ne!(ka, kb);
    }

    #[test]
    fn equal_keys_hash_equal() {
        use std::collections::HashSet;

        let a = ImageKey::parse("HTTPS://Example.com:443/flag.png#x").unwrap();
        let b = ImageKey::parse("https://example.com/flag.png").unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn rejects_unparseable_text() {
        let result = ImageKey::parse("not a url at all");
        assert!(matches!(result, Err(CoreError::InvalidLocation(_))));
    }

    #[test]
    fn rejects_missing_host() {
        let result = ImageKey::parse("file:///tmp/flag.png");
        assert!(
            matches!(result, Err(CoreError::MissingComponent(component)) if component == "host")
        );
    }

    #[test]
    fn display_matches_canonical_text() {
        let key = ImageKey::parse("https://example.com/flag.png").unwrap();
        assert_eq!(key.to_string(), key.as_str());
    }
}
