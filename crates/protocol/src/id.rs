use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A reference-counted, immutable identifier string.
///
/// Section ids and animation class names are cloned on every change
/// notification and every emitted command; wrapping `Arc<str>` makes
/// those clones a refcount bump instead of a heap allocation.
///
/// Implements `Borrow<str>` so maps keyed by `IdStr` can be probed with
/// a plain `&str`, and `PartialEq<&str>` so assertions like
/// `assert_eq!(active, "home")` work naturally.
#[derive(Debug, Clone, Eq)]
pub struct IdStr(Arc<str>);

impl IdStr {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// --- Equality ---

impl PartialEq for IdStr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer means equal.
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl PartialEq<str> for IdStr {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for IdStr {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

// --- Hashing ---

impl std::hash::Hash for IdStr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self.0).hash(state);
    }
}

// --- Deref / Borrow / AsRef ---

impl std::ops::Deref for IdStr {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for IdStr {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for IdStr {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

// --- Conversions ---

impl From<&str> for IdStr {
    #[inline]
    fn from(s: &str) -> Self {
        IdStr(Arc::from(s))
    }
}

impl From<String> for IdStr {
    #[inline]
    fn from(s: String) -> Self {
        IdStr(Arc::from(s.as_str()))
    }
}

// --- Display ---

impl std::fmt::Display for IdStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// --- Serde (hand-rolled to avoid the `rc` feature flag) ---

impl Serialize for IdStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IdStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(IdStr(Arc::from(s.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_allocation() {
        let a = IdStr::from("home");
        let b = a.clone();
        assert_eq!(&*a, &*b);
        assert_eq!(a, b);
    }

    #[test]
    fn eq_str() {
        let id = IdStr::from("projects");
        assert_eq!(id, "projects");
        assert!(id == "projects");
    }

    #[test]
    fn hashmap_lookup_by_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(IdStr::from("about"), 1);
        assert_eq!(map.get("about"), Some(&1));
    }

    #[test]
    fn serde_roundtrip() {
        let id = IdStr::from("contact");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"contact\"");
        let back: IdStr = serde_json::from_str(&json).unwrap_or_else(|_| IdStr::from(""));
        assert_eq!(back, "contact");
    }

    #[test]
    fn display() {
        let id = IdStr::from("home");
        assert_eq!(format!("{id}"), "home");
    }
}
