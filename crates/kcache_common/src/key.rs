//! Fixed-length keys identifying specialized kernel variants.

use sha2::{Digest, Sha256};
use std::fmt;

/// Number of characters in every cache key.
pub const KEY_LENGTH: usize = 65;

/// Leading character of keys produced by [`CacheKey::digest`].
const KEY_PREFIX: char = 'T';

/// A cache key of exactly [`KEY_LENGTH`] characters.
///
/// The content is opaque to the cache. Keys built by [`CacheKey::digest`]
/// consist of a `'T'` followed by the 64 lowercase hex digits of a SHA-256
/// digest, but any 65-character string is accepted by [`CacheKey::new`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Wraps an existing key, returning `None` unless it is exactly
    /// [`KEY_LENGTH`] characters long.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        (key.chars().count() == KEY_LENGTH).then_some(Self(key))
    }

    /// Derives a key from the SHA-256 digest of `data`.
    pub fn digest(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        let mut key = String::with_capacity(KEY_LENGTH);
        key.push(KEY_PREFIX);
        key.push_str(&hex::encode(hash));
        Self(key)
    }

    /// Derives a key from an ordered list of specialization components.
    ///
    /// Components are length-prefixed before hashing so that
    /// `["ab", "c"]` and `["a", "bc"]` produce different keys.
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            let part = part.as_ref();
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        let mut key = String::with_capacity(KEY_LENGTH);
        key.push(KEY_PREFIX);
        key.push_str(&hex::encode(hasher.finalize()));
        Self(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.0.chars().take(9).collect();
        write!(f, "CacheKey({head}..)")
    }
}
