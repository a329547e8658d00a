//! Global identity keys and symbol references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collection-wide identity of a node: owning package plus its local id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlobalKey {
    pub package: String,
    pub id: u32,
}

impl GlobalKey {
    pub fn new(package: impl Into<String>, id: u32) -> Self {
        Self {
            package: package.into(),
            id,
        }
    }
}

impl fmt::Display for GlobalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.package, self.id)
    }
}

/// Error for strings that are not `package#id`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid global key '{0}': expected 'package#id'")]
pub struct ParseKeyError(String);

impl FromStr for GlobalKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (package, id) = s
            .rsplit_once('#')
            .ok_or_else(|| ParseKeyError(s.to_string()))?;
        if package.is_empty() {
            return Err(ParseKeyError(s.to_string()));
        }
        let id = id.parse().map_err(|_| ParseKeyError(s.to_string()))?;
        Ok(Self::new(package, id))
    }
}

/// What a reference points at, as recorded by the extractor.
///
/// The three states are exclusive, so a reference never holds both a key and a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ReferenceTarget {
    Key(GlobalKey),
    External(String),
    Unresolved,
}

/// A named pointer to another symbol, possibly outside the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocReference {
    pub name: String,
    pub qualified_name: Option<String>,
    /// Package the extractor attributed the symbol to, if any.
    pub package: Option<String>,
    pub target: ReferenceTarget,
}

impl DocReference {
    /// A reference carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: None,
            package: None,
            target: ReferenceTarget::Unresolved,
        }
    }

    pub fn with_key(mut self, key: GlobalKey) -> Self {
        self.target = ReferenceTarget::Key(key);
        self
    }

    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.target = ReferenceTarget::External(url.into());
        self
    }

    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = Some(qualified_name.into());
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn key(&self) -> Option<&GlobalKey> {
        match &self.target {
            ReferenceTarget::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn external_url(&self) -> Option<&str> {
        match &self.target {
            ReferenceTarget::External(url) => Some(url),
            _ => None,
        }
    }

    /// Qualified name when known, else the bare name.
    pub fn lookup_name(&self) -> &str {
        self.qualified_name
            .as_deref()
            .filter(|q| !q.is_empty())
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[rstest]
    #[case("core#12", "core", 12)]
    #[case("@scope/pkg#0", "@scope/pkg", 0)]
    #[case("a#b#3", "a#b", 3)]
    fn test_parse_global_key(#[case] input: &str, #[case] package: &str, #[case] id: u32) {
        let_assert!(Ok(key) = input.parse::<GlobalKey>());
        check!(key.package == package);
        check!(key.id == id);
        check!(key.to_string() == input);
    }

    #[rstest]
    #[case("core")]
    #[case("#4")]
    #[case("core#x")]
    fn test_parse_global_key_rejects(#[case] input: &str) {
        check!(input.parse::<GlobalKey>().is_err());
    }

    #[test]
    fn test_target_states_are_exclusive() {
        let reference = DocReference::named("Foo")
            .with_key(GlobalKey::new("core", 1))
            .with_external_url("https://example.com/Foo");

        check!(reference.key().is_none());
        check!(reference.external_url() == Some("https://example.com/Foo"));
    }

    #[test]
    fn test_lookup_name_prefers_qualified() {
        check!(DocReference::named("Bar").lookup_name() == "Bar");
        check!(
            DocReference::named("Bar")
                .with_qualified_name("ns.Bar")
                .lookup_name()
                == "ns.Bar"
        );
        check!(
            DocReference::named("Bar")
                .with_qualified_name("")
                .lookup_name()
                == "Bar"
        );
    }
}
