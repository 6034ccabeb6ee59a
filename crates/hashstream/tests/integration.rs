#![cfg(feature = "sha256")]

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use hashstream::{
    CacheOptions, ErrorKind, Origin, ReadStatus, ReadStrategy, Sha256Hasher, SignatureFault,
    VerifiedCache,
};
use proptest::prelude::*;
use tempfile::tempfile;

fn cache_of(data: &[u8]) -> VerifiedCache {
    let expected = Sha256Hasher::digest(data);
    VerifiedCache::sha256(Cursor::new(data.to_vec()), &expected).unwrap()
}

#[test]
fn test_file_source() {
    let mut file = tempfile().unwrap();
    file.write_all(b"package payload").unwrap();
    // leave the file positioned away from the start
    file.seek(SeekFrom::Start(4)).unwrap();

    let expected = Sha256Hasher::digest(b"package payload");
    let options = CacheOptions::new().read_strategy(ReadStrategy::Fill);
    let mut cache =
        VerifiedCache::with_options(&mut file, Sha256Hasher::new(), &expected, options).unwrap();

    let mut contents = Vec::new();
    cache.read_to_end(&mut contents).unwrap();
    assert_eq!(contents, b"package payload");
}

#[test]
fn test_source_never_touched_after_construction() {
    let mut file = tempfile().unwrap();
    file.write_all(b"frozen").unwrap();
    let expected = Sha256Hasher::digest(b"frozen");
    let mut cache = VerifiedCache::sha256(&mut file, &expected).unwrap();

    file.set_len(0).unwrap();
    let mut contents = String::new();
    cache.read_to_string(&mut contents).unwrap();
    assert_eq!(contents, "frozen");
}

#[test]
fn test_empty_source() {
    let expected =
        hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855").unwrap();
    let mut cache = VerifiedCache::sha256(Cursor::new(Vec::new()), &expected).unwrap();
    assert_eq!(cache.len(), 0);

    let mut buf = [0u8; 8];
    let outcome = cache.read(Some(&mut buf[..])).unwrap();
    assert_eq!(outcome.bytes_read, 0);
    assert_eq!(outcome.status, ReadStatus::Partial);
}

#[test]
fn test_truncated_digest_rejected() {
    let data = b"some content";
    let digest = Sha256Hasher::digest(data);
    let err = VerifiedCache::sha256(Cursor::new(data.to_vec()), &digest[..16]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureInvalid);
    assert_eq!(
        err.fault(),
        Some(&SignatureFault::LengthMismatch {
            expected: 16,
            actual:   32,
        })
    );
}

proptest! {
    #[test]
    fn prop_round_trip(data in proptest::collection::vec(any::<u8>(), 0..512), chunk in 1usize..64) {
        let mut cache = cache_of(&data);
        let mut collected = Vec::new();
        let mut buf = vec![0u8; chunk];
        loop {
            let outcome = cache.read(Some(&mut buf[..])).unwrap();
            collected.extend_from_slice(&buf[..outcome.bytes_read]);
            if outcome.status == ReadStatus::Partial {
                break;
            }
        }
        prop_assert_eq!(collected, data);
    }

    #[test]
    fn prop_tamper_detected(
        data in proptest::collection::vec(any::<u8>(), 1..256),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let expected = Sha256Hasher::digest(&data);
        let mut tampered = data.clone();
        let i = index.index(tampered.len());
        tampered[i] ^= flip;

        let err = VerifiedCache::sha256(Cursor::new(tampered), &expected).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::SignatureInvalid);
        let is_mismatch = matches!(err.fault(), Some(SignatureFault::Mismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn prop_prefix_of_digest_rejected(data in proptest::collection::vec(any::<u8>(), 0..64), keep in 0usize..32) {
        let digest = Sha256Hasher::digest(&data);
        let err = VerifiedCache::sha256(Cursor::new(data), &digest[..keep]).unwrap_err();
        let is_length = matches!(err.fault(), Some(SignatureFault::LengthMismatch { .. }));
        prop_assert!(is_length);
    }

    #[test]
    fn prop_seek_stays_in_bounds(
        len in 0usize..128,
        moves in proptest::collection::vec((any::<i64>(), 0u8..3), 1..32),
    ) {
        let mut cache = cache_of(&vec![0xa5; len]);
        for (offset, origin) in moves {
            let origin = match origin {
                0 => Origin::Start,
                1 => Origin::Current,
                _ => Origin::End,
            };
            let before = cache.position() as i128;
            let position = cache.seek(offset, origin);
            prop_assert_eq!(position, cache.position());
            prop_assert!(position <= len as u64);

            let target = match origin {
                Origin::Start => offset as i128,
                Origin::Current => before + offset as i128,
                Origin::End => len as i128,
            };
            prop_assert_eq!(position as i128, target.clamp(0, len as i128));
        }
    }

    #[test]
    fn prop_read_exact_amount(
        data in proptest::collection::vec(any::<u8>(), 0..256),
        start in 0u64..300,
        n in 0usize..300,
    ) {
        let mut cache = cache_of(&data);
        let p = cache.seek(start as i64, Origin::Start) as usize;

        let mut buf = vec![0u8; n];
        let outcome = cache.read(Some(&mut buf[..])).unwrap();
        let expected = n.min(data.len() - p);
        prop_assert_eq!(outcome.bytes_read, expected);
        prop_assert_eq!(&buf[..expected], &data[p..p + expected]);
        prop_assert_eq!(cache.position(), (p + expected) as u64);
        let status = if expected == n { ReadStatus::Complete } else { ReadStatus::Partial };
        prop_assert_eq!(outcome.status, status);
    }
}
