use bytes::Bytes;
use std::fmt::{Debug, Formatter};
use zeroize::Zeroizing;

use crate::crypto::EllipticCurveType;

/// EcPublicPoint holds the affine coordinates of a curve point, each encoded
/// big-endian and left-padded to the curve's field size
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct EcPublicPoint {
    pub(crate) x: Bytes,
    pub(crate) y: Bytes,
}

impl EcPublicPoint {
    /// Returns the x coordinate
    pub fn x(&self) -> &Bytes {
        &self.x
    }

    /// Returns the y coordinate
    pub fn y(&self) -> &Bytes {
        &self.y
    }
}

/// EcKeyPair is a wrapper of CryptoProvider's elliptic curve key pair
#[derive(Default, Clone, Eq, PartialEq)]
pub struct EcKeyPair {
    pub(crate) curve: EllipticCurveType,
    pub(crate) private_key: Zeroizing<Vec<u8>>,
    pub(crate) public_point: EcPublicPoint,
}

impl Debug for EcKeyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcKeyPair")
            .field("curve", &self.curve)
            .field("public_point", &self.public_point)
            .finish_non_exhaustive()
    }
}

impl EcKeyPair {
    /// Returns the curve of the key pair
    pub fn curve(&self) -> EllipticCurveType {
        self.curve
    }

    /// Returns the private scalar, big-endian and padded to the field size.
    ///
    /// The scalar is wiped when the key pair is dropped.
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    /// Returns public point
    pub fn public_point(&self) -> &EcPublicPoint {
        &self.public_point
    }
}
