//! One-shot load and verification of a seekable source.
//!
//! The whole source is pulled into memory before its digest is checked, so a
//! caller never observes a byte that has not been verified.

use std::io::{self, Read, Seek, SeekFrom};

use tracing::{debug, warn};

use crate::{CacheOptions, Error, Hasher, ReadStrategy, Result, SignatureFault};

/// Verified contents of a source together with their digest.
#[derive(Debug)]
pub(crate) struct Loaded {
    pub buffer: Vec<u8>,
    pub digest: Vec<u8>,
}

pub(crate) fn load_and_verify<R, H>(
    source: &mut R,
    mut hasher: H,
    expected: &[u8],
    options: &CacheOptions,
) -> Result<Loaded>
where
    R: Read + Seek,
    H: Hasher,
{
    let size = discover_size(source)?;
    let len = check_size(size, options.get_max_size())?;

    let mut buffer = vec![0u8; len];
    let read = match options.get_read_strategy() {
        ReadStrategy::Single => source.read(&mut buffer).map_err(Error::SourceUnavailable)?,
        ReadStrategy::Fill => fill(source, &mut buffer)?,
    };
    if read != len {
        return Err(reject(SignatureFault::ShortRead {
            expected: size,
            actual:   read as u64,
        }));
    }

    hasher.update(&buffer);
    let digest = hasher
        .finalize()
        .map_err(|e| reject(SignatureFault::DigestFailed(e)))?;

    check_length(expected, &digest).map_err(reject)?;
    check_content(expected, &digest).map_err(reject)?;

    debug!(size, digest = %hex::encode(&digest), "source verified");
    Ok(Loaded { buffer, digest })
}

/// Seeks to the end to learn the size, then rewinds to the start.
pub(crate) fn discover_size<R: Seek>(source: &mut R) -> Result<u64> {
    let size = source.seek(SeekFrom::End(0)).map_err(Error::SourceUnavailable)?;
    source.seek(SeekFrom::Start(0)).map_err(Error::SourceUnavailable)?;
    debug!(size, "discovered source size");
    Ok(size)
}

fn check_size(size: u64, limit: u64) -> Result<usize> {
    if size > limit {
        return Err(Error::SourceTooLarge { size, limit });
    }
    usize::try_from(size).map_err(|_| Error::SourceTooLarge {
        size,
        limit: usize::MAX as u64,
    })
}

fn fill<R: Read>(source: &mut R, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match source.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::SourceUnavailable(e)),
        }
    }
    Ok(filled)
}

/// Rejects an expectation whose length differs from the computed digest.
pub(crate) fn check_length(expected: &[u8], actual: &[u8]) -> std::result::Result<(), SignatureFault> {
    if expected.len() != actual.len() {
        return Err(SignatureFault::LengthMismatch {
            expected: expected.len(),
            actual:   actual.len(),
        });
    }
    Ok(())
}

/// Compares equal-length digests without exiting early on the first
/// differing byte.
pub(crate) fn check_content(expected: &[u8], actual: &[u8]) -> std::result::Result<(), SignatureFault> {
    let diff = expected
        .iter()
        .zip(actual.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));
    if diff != 0 || expected.len() != actual.len() {
        return Err(SignatureFault::Mismatch {
            expected: expected.to_vec(),
            actual:   actual.to_vec(),
        });
    }
    Ok(())
}

fn reject(fault: SignatureFault) -> Error {
    warn!(%fault, "rejecting source");
    Error::SignatureInvalid(fault)
}
