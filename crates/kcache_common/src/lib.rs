//! Shared foundational types for the kernel offline cache.
//!
//! This crate provides the architecture tag used to route cache entries to a
//! backend subdirectory and the fixed-length cache key that identifies a
//! specialized compilation variant.

#![warn(missing_docs)]

pub mod arch;
pub mod key;

pub use arch::{Arch, ParseArchError};
pub use key::{CacheKey, KEY_LENGTH};
