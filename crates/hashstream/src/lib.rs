//! Seekable in-memory stream over content verified against an expected digest.
//!
//! [`VerifiedCache`] reads a whole `Read + Seek` source into memory, hashes it,
//! and refuses to exist unless the digest matches. Once built it serves reads
//! and seeks from memory only, so downstream code can treat untrusted input as
//! an already checked blob.
//!
//! # Example
//!
//! ```
//! use std::io::{Cursor, Read};
//! use hashstream::{Sha256Hasher, VerifiedCache};
//!
//! let data = b"hello world".to_vec();
//! let expected = Sha256Hasher::digest(&data);
//!
//! let mut cache = VerifiedCache::sha256(Cursor::new(data), &expected).unwrap();
//! let mut contents = String::new();
//! cache.read_to_string(&mut contents).unwrap();
//! assert_eq!(contents, "hello world");
//! ```

pub use self::cache::{Origin, ReadOutcome, ReadStatus, VerifiedCache};
pub use self::error::{DigestError, Error, ErrorKind, Result, SignatureFault};
pub use self::hasher::Hasher;
pub use self::options::{CacheOptions, DEFAULT_MAX_SIZE, ReadStrategy};

#[cfg(any(feature = "sha256", feature = "sha3"))]
pub use self::hasher::DigestHasher;

#[cfg(feature = "sha256")]
pub use self::hasher::Sha256Hasher;

#[cfg(feature = "sha3")]
pub use self::hasher::Sha3_256Hasher;

#[cfg(feature = "blake3")]
pub use self::hasher::Blake3Hasher;

mod cache;
mod error;
mod hasher;
mod loader;
mod options;
