//! Self-validating names for cached kernels.
//!
//! A mangled name has the form `<base_name><key>_<checksum>`, where `key` is
//! exactly [`KEY_LENGTH`] characters and `checksum` is the decimal value of
//! `sum(base_name) ^ sum(key)`, each sum taken over character code points.
//! The checksum is a corruption check for file names found in a cache
//! directory, not a cryptographic integrity guarantee.
//!
//! Decoding splits on the *last* `_`, so base names may themselves contain
//! underscores. The key is always the [`KEY_LENGTH`] characters immediately
//! before that separator.

use std::fmt;

use kcache_common::KEY_LENGTH;

/// Character separating the key from the checksum suffix.
pub const SEPARATOR: char = '_';

/// Shortest string that can be a mangled name: one base-name character,
/// the key, and the separator.
pub const MIN_MANGLED_NAME_LENGTH: usize = KEY_LENGTH + 2;

/// The two components recovered from a mangled name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemangledName<'a> {
    /// The human-readable part, usually the kernel name.
    pub base_name: &'a str,
    /// The fixed-length key identifying the specialization.
    pub key: &'a str,
}

/// Encodes `base_name` and `key` into a single mangled name.
///
/// If `key` is not exactly [`KEY_LENGTH`] characters, no mangled form exists
/// and `base_name` is returned unchanged.
pub fn mangle_name(base_name: &str, key: &str) -> String {
    if key.chars().count() != KEY_LENGTH {
        return base_name.to_string();
    }
    let checksum = ordinal_sum(base_name) ^ ordinal_sum(key);
    format!("{base_name}{key}{SEPARATOR}{checksum}")
}

/// Decodes a mangled name back into its base name and key.
///
/// Returns `None` if `mangled_name` is too short, has no separator, carries a
/// non-numeric checksum, leaves no room for a full key before the separator,
/// or fails the checksum. Foreign and corrupted names are expected inputs, so
/// none of these cases is an error.
pub fn try_demangle_name(mangled_name: &str) -> Option<DemangledName<'_>> {
    let split = split_mangled(mangled_name)?;
    Some(split.parts(mangled_name))
}

/// A name produced by [`mangle_name`], or parsed and verified from one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MangledName {
    name: String,
    split: Split,
}

impl MangledName {
    /// Mangles `base_name` and `key`, returning `None` if `key` has the wrong length.
    pub fn new(base_name: &str, key: &str) -> Option<Self> {
        if key.chars().count() != KEY_LENGTH {
            return None;
        }
        let name = mangle_name(base_name, key);
        let split = Split {
            key_start: base_name.len(),
            separator: base_name.len() + key.len(),
        };
        Some(Self { name, split })
    }

    /// Verifies `mangled_name`, returning `None` if it does not decode.
    pub fn parse(mangled_name: &str) -> Option<Self> {
        let split = split_mangled(mangled_name)?;
        Some(Self {
            name: mangled_name.to_string(),
            split,
        })
    }

    /// Returns the base name component.
    pub fn base_name(&self) -> &str {
        self.split.parts(&self.name).base_name
    }

    /// Returns the key component.
    pub fn key(&self) -> &str {
        self.split.parts(&self.name).key
    }

    /// Returns both components.
    pub fn demangle(&self) -> DemangledName<'_> {
        self.split.parts(&self.name)
    }

    /// Returns the full mangled name.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Consumes the value and returns the mangled string.
    pub fn into_string(self) -> String {
        self.name
    }
}

impl AsRef<str> for MangledName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for MangledName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for MangledName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MangledName({:?})", self.base_name())
    }
}

/// Byte offsets of the key and the separator within a verified mangled name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Split {
    key_start: usize,
    separator: usize,
}

impl Split {
    fn parts<'a>(&self, name: &'a str) -> DemangledName<'a> {
        DemangledName {
            base_name: &name[..self.key_start],
            key: &name[self.key_start..self.separator],
        }
    }
}

fn split_mangled(mangled_name: &str) -> Option<Split> {
    if mangled_name.chars().count() < MIN_MANGLED_NAME_LENGTH {
        return None;
    }
    let separator = mangled_name.rfind(SEPARATOR)?;
    let checksum = parse_checksum(&mangled_name[separator + SEPARATOR.len_utf8()..])?;

    // The key is the last KEY_LENGTH chars before the separator; a separator
    // closer than that to the start cannot belong to a mangled name.
    let body = &mangled_name[..separator];
    let (key_start, _) = body.char_indices().rev().nth(KEY_LENGTH - 1)?;

    let (base_name, key) = body.split_at(key_start);
    if ordinal_sum(base_name) ^ ordinal_sum(key) != checksum {
        return None;
    }
    Some(Split {
        key_start,
        separator,
    })
}

/// Parses a plain decimal checksum. Signs, whitespace and empty input are rejected.
fn parse_checksum(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn ordinal_sum(s: &str) -> u64 {
    s.chars().fold(0u64, |acc, c| acc.wrapping_add(u64::from(c)))
}
