//! Elliptic curve, hash and point format identifiers shared by key formats and
//! keys, plus the [`provider::CryptoProvider`] that performs curve arithmetic.
//!
//! Every enum carries fixed integer codes that appear on the wire. Codes this
//! crate does not know decode into an `Unknown` variant so the value survives
//! a round trip and can be rejected by validation with a precise error.


pub mod key_pair;
pub mod provider;

use std::fmt::{Display, Formatter};

/// Elliptic curve of the KEM.
#[allow(non_camel_case_types)]
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum EllipticCurveType {
    #[default]
    UNKNOWN_CURVE = 0,
    NIST_P256 = 2,
    NIST_P384 = 3,
    NIST_P521 = 4,
    CURVE25519 = 5,
    Unknown(u32),
}

impl From<u32> for EllipticCurveType {
    fn from(v: u32) -> Self {
        match v {
            0 => EllipticCurveType::UNKNOWN_CURVE,
            2 => EllipticCurveType::NIST_P256,
            3 => EllipticCurveType::NIST_P384,
            4 => EllipticCurveType::NIST_P521,
            5 => EllipticCurveType::CURVE25519,
            _ => EllipticCurveType::Unknown(v),
        }
    }
}

impl From<EllipticCurveType> for u32 {
    fn from(val: EllipticCurveType) -> u32 {
        match val {
            EllipticCurveType::UNKNOWN_CURVE => 0,
            EllipticCurveType::NIST_P256 => 2,
            EllipticCurveType::NIST_P384 => 3,
            EllipticCurveType::NIST_P521 => 4,
            EllipticCurveType::CURVE25519 => 5,
            EllipticCurveType::Unknown(v) => v,
        }
    }
}

impl Display for EllipticCurveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl EllipticCurveType {
    /// Size in bytes of a field element (and of a scalar) on this curve.
    pub fn field_size(&self) -> Option<usize> {
        match *self {
            EllipticCurveType::NIST_P256 | EllipticCurveType::CURVE25519 => Some(32),
            EllipticCurveType::NIST_P384 => Some(48),
            EllipticCurveType::NIST_P521 => Some(66),
            EllipticCurveType::UNKNOWN_CURVE | EllipticCurveType::Unknown(_) => None,
        }
    }

    /// Classical security level of the curve in bits.
    pub fn security_bits(&self) -> Option<usize> {
        match *self {
            EllipticCurveType::NIST_P256 | EllipticCurveType::CURVE25519 => Some(128),
            EllipticCurveType::NIST_P384 => Some(192),
            EllipticCurveType::NIST_P521 => Some(256),
            EllipticCurveType::UNKNOWN_CURVE | EllipticCurveType::Unknown(_) => None,
        }
    }
}

/// Hash function used by HKDF in the KEM, and by HMAC in some DEMs.
#[allow(non_camel_case_types)]
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum HashType {
    #[default]
    UNKNOWN_HASH = 0,
    SHA1 = 1,
    SHA384 = 2,
    SHA256 = 3,
    SHA512 = 4,
    SHA224 = 5,
    Unknown(u32),
}

impl From<u32> for HashType {
    fn from(v: u32) -> Self {
        match v {
            0 => HashType::UNKNOWN_HASH,
            1 => HashType::SHA1,
            2 => HashType::SHA384,
            3 => HashType::SHA256,
            4 => HashType::SHA512,
            5 => HashType::SHA224,
            _ => HashType::Unknown(v),
        }
    }
}

impl From<HashType> for u32 {
    fn from(val: HashType) -> u32 {
        match val {
            HashType::UNKNOWN_HASH => 0,
            HashType::SHA1 => 1,
            HashType::SHA384 => 2,
            HashType::SHA256 => 3,
            HashType::SHA512 => 4,
            HashType::SHA224 => 5,
            HashType::Unknown(v) => v,
        }
    }
}

impl Display for HashType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl HashType {
    /// Digest size in bytes.
    pub fn digest_size(&self) -> Option<usize> {
        match *self {
            HashType::SHA1 => Some(20),
            HashType::SHA224 => Some(28),
            HashType::SHA256 => Some(32),
            HashType::SHA384 => Some(48),
            HashType::SHA512 => Some(64),
            HashType::UNKNOWN_HASH | HashType::Unknown(_) => None,
        }
    }
}

/// Encoding of elliptic curve points.
#[allow(non_camel_case_types)]
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum EcPointFormat {
    #[default]
    UNKNOWN_FORMAT = 0,
    /// SEC1 uncompressed: `0x04 || x || y`.
    UNCOMPRESSED = 1,
    /// SEC1 compressed: `0x02 || x` or `0x03 || x`.
    COMPRESSED = 2,
    /// `x || y` without the SEC1 prefix byte, kept for legacy ciphertexts.
    DO_NOT_USE_CRUNCHY_UNCOMPRESSED = 3,
    Unknown(u32),
}

impl From<u32> for EcPointFormat {
    fn from(v: u32) -> Self {
        match v {
            0 => EcPointFormat::UNKNOWN_FORMAT,
            1 => EcPointFormat::UNCOMPRESSED,
            2 => EcPointFormat::COMPRESSED,
            3 => EcPointFormat::DO_NOT_USE_CRUNCHY_UNCOMPRESSED,
            _ => EcPointFormat::Unknown(v),
        }
    }
}

impl From<EcPointFormat> for u32 {
    fn from(val: EcPointFormat) -> u32 {
        match val {
            EcPointFormat::UNKNOWN_FORMAT => 0,
            EcPointFormat::UNCOMPRESSED => 1,
            EcPointFormat::COMPRESSED => 2,
            EcPointFormat::DO_NOT_USE_CRUNCHY_UNCOMPRESSED => 3,
            EcPointFormat::Unknown(v) => v,
        }
    }
}

impl Display for EcPointFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
