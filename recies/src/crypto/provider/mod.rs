//! CryptoProvider trait and implementations that provide the randomness and elliptic curve
//! arithmetic used by key generation and key validation.

#[cfg(test)]
mod provider_test;

mod rand;
pub use self::rand::{OsRand, RandChacha};
#[cfg(feature = "RustCryptoProvider")]
mod rust;
#[cfg(feature = "RustCryptoProvider")]
pub use self::rust::RustCryptoProvider;

use bytes::Bytes;
use zeroize::Zeroizing;

use crate::crypto::key_pair::{EcKeyPair, EcPublicPoint};
use crate::crypto::{EcPointFormat, EllipticCurveType};
use crate::utilities::error::*;

/// Rand trait provides cryptographically secure randomness
///
/// A failure is reported as [`Error::RandomnessUnavailable`] and is never retried by callers.
pub trait Rand: Send + Sync {
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// Curve trait provides key generation, point validation and point encoding for one elliptic
/// curve
pub trait Curve: Send + Sync {
    /// Returns the curve this implementation operates on
    fn curve_type(&self) -> EllipticCurveType;

    /// Size in bytes of the curve's field elements and scalars
    fn field_size(&self) -> usize;

    /// Generate a fresh key pair, drawing the private scalar from `rand`
    fn generate_key_pair(&self, rand: &dyn Rand) -> Result<EcKeyPair>;

    /// Compute the public point of a private scalar
    fn public_point(&self, private_key: &[u8]) -> Result<EcPublicPoint>;

    /// Check that (x, y) is a valid point on the curve
    fn validate_public_point(&self, x: &[u8], y: &[u8]) -> Result<()>;

    /// Encode (x, y) in the given point format
    fn encode_point(&self, x: &[u8], y: &[u8], point_format: EcPointFormat) -> Result<Bytes>;
}

/// CryptoProvider trait specifies the randomness source and curve implementations used by key
/// managers
pub trait CryptoProvider: Send + Sync {
    /// Check whether the curve is supported or not
    fn supports(&self, curve: EllipticCurveType) -> bool;

    /// Return supported curves
    fn supported(&self) -> Vec<EllipticCurveType>;

    /// Secure randomness source
    fn rand(&self) -> &dyn Rand;

    /// Derive Curve trait object for the given curve type
    fn curve(&self, curve: EllipticCurveType) -> Result<&dyn Curve>;

    /// Check whether the point format can be produced and parsed for the curve
    fn supports_point_format(&self, curve: EllipticCurveType, point_format: EcPointFormat) -> bool {
        self.supports(curve)
            && matches!(
                point_format,
                EcPointFormat::UNCOMPRESSED
                    | EcPointFormat::COMPRESSED
                    | EcPointFormat::DO_NOT_USE_CRUNCHY_UNCOMPRESSED
            )
    }

    /// Generate a key pair on the given curve with the provider's randomness
    fn generate_key_pair(&self, curve: EllipticCurveType) -> Result<EcKeyPair> {
        self.curve(curve)?.generate_key_pair(self.rand())
    }
}

/// Normalize a big-endian integer to exactly `size` bytes.
///
/// Leading zero bytes beyond `size` are dropped and shorter inputs are left-padded, so
/// coordinates written with a sign byte or with minimal length are both accepted.
pub(crate) fn pad_to_field_size(v: &[u8], size: usize) -> Option<Zeroizing<Vec<u8>>> {
    let first_non_zero = v.iter().position(|b| *b != 0).unwrap_or(v.len());
    let trimmed = &v[first_non_zero..];
    if trimmed.len() > size {
        return None;
    }
    let mut out = Zeroizing::new(vec![0u8; size]);
    out[size - trimmed.len()..].copy_from_slice(trimmed);
    Some(out)
}
