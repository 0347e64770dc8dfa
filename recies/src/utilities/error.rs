use thiserror::Error;

use crate::crypto::{EcPointFormat, EllipticCurveType, HashType};

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`] values.
///
/// Every error produced at the key manager boundary falls into one of these
/// buckets; callers that only care about "bad bytes" versus "bad parameters"
/// can match on the kind instead of individual variants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Malformed, truncated or unknown-field input bytes.
    Serialization,
    /// Well-formed input describing an unsupported or insecure combination.
    InvalidParameters,
    /// The secure randomness source failed.
    RandomnessUnavailable,
    /// No key manager is registered for a type URL.
    UnknownKeyType,
    Other,
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("buffer too small")]
    BufferTooSmall,
    #[error("varint exceeds 64 bits")]
    VarintExceeds64Bits,
    #[error("varint value {0} exceeds uint32")]
    VarintExceeds32Bits(u64),
    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),
    #[error("unsupported wire type {wire_type} for field {field}")]
    InvalidWireType { field: u32, wire_type: u8 },
    #[error("unknown field {0}")]
    UnknownField(u32),
    #[error("length {0} exceeds maximum value of uint32")]
    LengthExceedsMaximumValueOfU32(usize),
    #[error("input contains {0} excess bytes")]
    InputContainsExcessBytes(usize),
    #[error("utf8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unsupported elliptic curve {0}")]
    UnsupportedEllipticCurve(EllipticCurveType),
    #[error("unsupported hash type {0}")]
    UnsupportedHashType(HashType),
    #[error("hash type {hash} is too weak for elliptic curve {curve}")]
    HashTooWeakForCurve {
        curve: EllipticCurveType,
        hash: HashType,
    },
    #[error("unsupported ec point format {0}")]
    UnsupportedPointFormat(EcPointFormat),
    #[error("dem key type {0} has no registered aead key manager")]
    UnregisteredDemKeyType(String),
    #[error("invalid key version {0}")]
    InvalidKeyVersion(u32),
    #[error("invalid {name} key size {size}")]
    InvalidKeySize { name: &'static str, size: usize },
    #[error("invalid iv size {0}")]
    InvalidIvSize(u32),
    #[error("invalid tag size {size} for hash type {hash}")]
    InvalidTagSize { hash: HashType, size: u32 },
    #[error("invalid elliptic curve private key")]
    InvalidPrivateKey,
    #[error("point is not on elliptic curve {0}")]
    InvalidPublicKeyPoint(EllipticCurveType),
    #[error("private key does not match its public key")]
    PrivateKeyMismatch,
    #[error("failed to sample a valid scalar for elliptic curve {0}")]
    ScalarSamplingFailed(EllipticCurveType),

    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    #[error("unknown key type {0}")]
    UnknownKeyType(String),
    #[error("key manager for type {0} is already registered")]
    KeyManagerAlreadyRegistered(String),
    #[error("key manager for type {0} does not support key generation")]
    KeyGenerationNotSupported(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BufferTooSmall
            | Error::VarintExceeds64Bits
            | Error::VarintExceeds32Bits(_)
            | Error::InvalidFieldNumber(_)
            | Error::InvalidWireType { .. }
            | Error::UnknownField(_)
            | Error::LengthExceedsMaximumValueOfU32(_)
            | Error::InputContainsExcessBytes(_)
            | Error::Utf8(_) => ErrorKind::Serialization,

            Error::UnsupportedEllipticCurve(_)
            | Error::UnsupportedHashType(_)
            | Error::HashTooWeakForCurve { .. }
            | Error::UnsupportedPointFormat(_)
            | Error::UnregisteredDemKeyType(_)
            | Error::InvalidKeyVersion(_)
            | Error::InvalidKeySize { .. }
            | Error::InvalidIvSize(_)
            | Error::InvalidTagSize { .. }
            | Error::InvalidPrivateKey
            | Error::InvalidPublicKeyPoint(_)
            | Error::PrivateKeyMismatch => ErrorKind::InvalidParameters,

            Error::RandomnessUnavailable(_) | Error::ScalarSamplingFailed(_) => {
                ErrorKind::RandomnessUnavailable
            }

            Error::UnknownKeyType(_) => ErrorKind::UnknownKeyType,

            Error::KeyManagerAlreadyRegistered(_)
            | Error::KeyGenerationNotSupported(_)
            | Error::Other(_) => ErrorKind::Other,
        }
    }
}

impl From<getrandom::Error> for Error {
    fn from(e: getrandom::Error) -> Self {
        Error::RandomnessUnavailable(e.to_string())
    }
}

impl From<rand_core::Error> for Error {
    fn from(e: rand_core::Error) -> Self {
        Error::RandomnessUnavailable(e.to_string())
    }
}
