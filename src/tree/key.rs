//! Case-insensitive constraint keys.
//!
//! `controller`, `Controller` and `CONTROLLER` name the same dimension. The
//! original spelling is kept for display and serialization.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A constraint name, compared and hashed case-insensitively.
#[derive(Clone)]
pub struct CriterionKey(Box<str>);

impl CriterionKey {
    /// Create a key from any string-like value.
    pub fn new(key: impl Into<Box<str>>) -> Self {
        Self(key.into())
    }

    /// The key as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the key has no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().flat_map(char::to_lowercase)
    }
}

impl PartialEq for CriterionKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded().eq(other.folded())
    }
}

impl Eq for CriterionKey {}

impl Hash for CriterionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0usize;
        for c in self.folded() {
            c.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl fmt::Debug for CriterionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for CriterionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CriterionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for CriterionKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl AsRef<str> for CriterionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CriterionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CriterionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
