//! Name keys for registered properties and data sources

use std::borrow::{Borrow, Cow};
use std::hash::{Hash, Hasher};

/// A registry key, compared and hashed by content
///
/// Static names are stored by reference without copying; names built at
/// runtime (group-scoped paths) are owned. Lookups borrow the key as `str`,
/// so queries never allocate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PropertyKey(Cow<'static, str>);

impl PropertyKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key's characters are borrowed from static storage
    pub fn is_static(&self) -> bool {
        matches!(self.0, Cow::Borrowed(_))
    }
}

// Must hash exactly like `str` so `HashMap::get(&str)` finds the entry
impl Hash for PropertyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for PropertyKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for PropertyKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&'static str> for PropertyKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
