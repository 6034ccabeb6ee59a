use std::io;

/// Failure reported by a [`Hasher`](crate::Hasher) while producing a digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("digest computation failed: {0}")]
pub struct DigestError(pub String);

/// Why a loaded source could not be trusted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureFault {
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: u64, actual: u64 },

    #[error(transparent)]
    DigestFailed(DigestError),

    #[error("digest length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("digest mismatch: expected {}, got {}", hex::encode(.expected), hex::encode(.actual))]
    Mismatch {
        expected: Vec<u8>,
        actual:   Vec<u8>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[source] io::Error),

    #[error("invalid signature: {0}")]
    SignatureInvalid(SignatureFault),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("source of {size} bytes exceeds limit of {limit} bytes")]
    SourceTooLarge { size: u64, limit: u64 },

    #[error("expected digest is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Coarse classification callers recover on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    SignatureInvalid,
    InvalidArgument,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceUnavailable(_) => ErrorKind::SourceUnavailable,
            Self::SignatureInvalid(_) | Self::SourceTooLarge { .. } => ErrorKind::SignatureInvalid,
            Self::InvalidArgument(_) | Self::InvalidHex(_) => ErrorKind::InvalidArgument,
        }
    }

    pub fn fault(&self) -> Option<&SignatureFault> {
        match self {
            Self::SignatureInvalid(fault) => Some(fault),
            _ => None,
        }
    }
}

impl From<SignatureFault> for Error {
    fn from(fault: SignatureFault) -> Self { Self::SignatureInvalid(fault) }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::SourceUnavailable(e) => e,
            Error::SignatureInvalid(_) | Error::SourceTooLarge { .. } => {
                io::Error::new(io::ErrorKind::InvalidData, err)
            }
            Error::InvalidArgument(_) | Error::InvalidHex(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
