use std::io::{self, BufRead, Read, Seek, SeekFrom};

use bytes::Bytes;

use crate::loader::{self, Loaded};
use crate::{CacheOptions, Error, Hasher, Result};

/// Reference point for [`VerifiedCache::seek`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Start,
    Current,
    /// Always lands exactly at the end of the buffer; the offset is ignored.
    End,
}

/// Whether a read satisfied the full request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadStatus {
    Complete,
    /// Fewer bytes than requested because the end of the buffer was reached.
    Partial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOutcome {
    pub bytes_read: usize,
    pub status:     ReadStatus,
}

/// In-memory copy of a source whose digest matched the expected value.
///
/// Construction reads the source once and either yields a fully verified
/// cache or an error. Afterwards all reads and seeks are served from memory
/// and the cursor always stays within `0..=len()`.
#[derive(Clone, Debug)]
pub struct VerifiedCache {
    buffer: Bytes,
    digest: Vec<u8>,
    cursor: u64,
}

impl VerifiedCache {
    /// Load `source` and verify it against `expected` with default options.
    pub fn new<R, H>(source: R, hasher: H, expected: &[u8]) -> Result<Self>
    where
        R: Read + Seek,
        H: Hasher,
    {
        Self::with_options(source, hasher, expected, CacheOptions::new())
    }

    pub fn with_options<R, H>(
        mut source: R,
        hasher: H,
        expected: &[u8],
        options: CacheOptions,
    ) -> Result<Self>
    where
        R: Read + Seek,
        H: Hasher,
    {
        let Loaded { buffer, digest } = loader::load_and_verify(&mut source, hasher, expected, &options)?;
        Ok(Self {
            buffer: Bytes::from(buffer),
            digest,
            cursor: 0,
        })
    }

    /// Like [`new`](Self::new), with the expected digest given as hex.
    pub fn from_hex<R, H>(source: R, hasher: H, expected_hex: &str) -> Result<Self>
    where
        R: Read + Seek,
        H: Hasher,
    {
        let expected = hex::decode(expected_hex.trim())?;
        Self::new(source, hasher, &expected)
    }

    #[cfg(feature = "sha256")]
    pub fn sha256<R: Read + Seek>(source: R, expected: &[u8]) -> Result<Self> {
        Self::new(source, crate::Sha256Hasher::new(), expected)
    }

    /// Move the cursor and return its new absolute position.
    ///
    /// Targets outside the buffer saturate to its bounds, so this never fails.
    pub fn seek(&mut self, offset: i64, origin: Origin) -> u64 {
        let len = self.len() as u64;
        let target = match origin {
            Origin::Current => {
                if offset < 0 {
                    self.cursor.saturating_sub(offset.unsigned_abs())
                } else {
                    self.cursor.saturating_add(offset as u64)
                }
            }
            Origin::Start => offset.max(0) as u64,
            Origin::End => len,
        };
        self.cursor = target.min(len);
        self.cursor
    }

    /// Copy bytes at the cursor into `dest`, filling at most `dest.len()`.
    ///
    /// A `None` destination is rejected without touching the cursor.
    pub fn read(&mut self, dest: Option<&mut [u8]>) -> Result<ReadOutcome> {
        let dest = dest.ok_or(Error::InvalidArgument("destination buffer is absent"))?;
        let remaining = self.remaining_slice();
        let to_read = dest.len().min(remaining.len());
        dest[..to_read].copy_from_slice(&remaining[..to_read]);
        self.cursor += to_read as u64;

        let status = if to_read == dest.len() {
            ReadStatus::Complete
        } else {
            ReadStatus::Partial
        };
        Ok(ReadOutcome {
            bytes_read: to_read,
            status,
        })
    }

    pub fn len(&self) -> usize { self.buffer.len() }

    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    pub fn position(&self) -> u64 { self.cursor }

    pub fn remaining(&self) -> usize { self.remaining_slice().len() }

    pub fn as_bytes(&self) -> &[u8] { &self.buffer }

    /// Digest the contents were verified against.
    pub fn digest(&self) -> &[u8] { &self.digest }

    pub fn digest_hex(&self) -> String { hex::encode(&self.digest) }

    /// Independent cache over the same verified bytes, positioned at the start.
    pub fn fork(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            digest: self.digest.clone(),
            cursor: 0,
        }
    }

    pub fn into_bytes(self) -> Bytes { self.buffer }

    // cursor <= len holds after every mutation
    fn remaining_slice(&self) -> &[u8] { &self.buffer[self.cursor as usize..] }
}

impl Read for VerifiedCache {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(VerifiedCache::read(self, Some(buf))?.bytes_read)
    }
}

impl BufRead for VerifiedCache {
    fn fill_buf(&mut self) -> io::Result<&[u8]> { Ok(self.remaining_slice()) }

    fn consume(&mut self, amt: usize) {
        let amt = amt.min(self.remaining());
        self.cursor += amt as u64;
    }
}

impl Seek for VerifiedCache {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let position = match pos {
            SeekFrom::Start(offset) => {
                let len = self.len() as u64;
                self.cursor = offset.min(len);
                self.cursor
            }
            SeekFrom::Current(offset) => VerifiedCache::seek(self, offset, Origin::Current),
            SeekFrom::End(offset) => VerifiedCache::seek(self, offset, Origin::End),
        };
        Ok(position)
    }

    fn stream_position(&mut self) -> io::Result<u64> { Ok(self.cursor) }
}

impl AsRef<[u8]> for VerifiedCache {
    fn as_ref(&self) -> &[u8] { self.as_bytes() }
}
