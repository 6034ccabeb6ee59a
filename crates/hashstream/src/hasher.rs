use crate::DigestError;

/// Digest algorithm fed once with the whole cached buffer.
pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Result<Vec<u8>, DigestError>;
}

/// Adapter for any RustCrypto [`digest::Digest`] implementation.
#[cfg(any(feature = "sha256", feature = "sha3"))]
#[derive(Debug, Clone, Default)]
pub struct DigestHasher<D>(D);

#[cfg(any(feature = "sha256", feature = "sha3"))]
impl<D: digest::Digest> DigestHasher<D> {
    pub fn new() -> Self { Self(D::new()) }

    pub fn digest(data: &[u8]) -> Vec<u8> { D::digest(data).to_vec() }
}

#[cfg(any(feature = "sha256", feature = "sha3"))]
impl<D: digest::Digest + Send> Hasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) { digest::Digest::update(&mut self.0, data); }

    fn finalize(self) -> Result<Vec<u8>, DigestError> { Ok(self.0.finalize().to_vec()) }
}

#[cfg(feature = "sha256")]
pub type Sha256Hasher = DigestHasher<sha2::Sha256>;

#[cfg(feature = "sha3")]
pub type Sha3_256Hasher = DigestHasher<sha3::Sha3_256>;

#[cfg(feature = "blake3")]
#[derive(Debug, Clone, Default)]
pub struct Blake3Hasher(blake3::Hasher);

#[cfg(feature = "blake3")]
impl Blake3Hasher {
    pub fn new() -> Self { Self(blake3::Hasher::new()) }

    pub fn digest(data: &[u8]) -> Vec<u8> { blake3::hash(data).as_bytes().to_vec() }
}

#[cfg(feature = "blake3")]
impl Hasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }

    fn finalize(self) -> Result<Vec<u8>, DigestError> {
        Ok(self.0.finalize().as_bytes().to_vec())
    }
}
