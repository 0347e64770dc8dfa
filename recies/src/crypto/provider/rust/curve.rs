use bytes::Bytes;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use zeroize::Zeroizing;

use crate::crypto::key_pair::{EcKeyPair, EcPublicPoint};
use crate::crypto::provider::{pad_to_field_size, Rand};
use crate::crypto::{EcPointFormat, EllipticCurveType};
use crate::utilities::error::*;

// A uniformly random field-size string is out of range with probability below 2^-32 on
// every supported curve, so running out of attempts means the source is broken.
const MAX_SCALAR_SAMPLING_ATTEMPTS: usize = 16;

const SEC1_UNCOMPRESSED_PREFIX: u8 = 0x04;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) enum CurveScheme {
    P256,
    P384,
    P521,
}

impl CurveScheme {
    fn sample_scalar(&self, rand: &dyn Rand, scalar: &mut [u8]) -> Result<()> {
        rand.fill(scalar)?;
        if *self == CurveScheme::P521 {
            // the P-521 order is just below 2^521, keep only the low 521 bits
            scalar[0] &= 0x01;
        }
        Ok(())
    }

    fn sec1_uncompressed(&self, x: &[u8], y: &[u8]) -> Result<Vec<u8>> {
        let size = self.field_size_bytes();
        let invalid = || Error::InvalidPublicKeyPoint(self.curve_type_value());
        let x = pad_to_field_size(x, size).ok_or_else(invalid)?;
        let y = pad_to_field_size(y, size).ok_or_else(invalid)?;

        let mut sec1 = Vec::with_capacity(1 + 2 * size);
        sec1.push(SEC1_UNCOMPRESSED_PREFIX);
        sec1.extend_from_slice(&x);
        sec1.extend_from_slice(&y);
        Ok(sec1)
    }

    // Returns the (uncompressed, compressed) SEC1 encodings of a validated point.
    fn sec1_encodings(&self, x: &[u8], y: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
        let sec1 = self.sec1_uncompressed(x, y)?;
        let invalid = |_| Error::InvalidPublicKeyPoint(self.curve_type_value());
        match *self {
            CurveScheme::P256 => {
                let public_key = p256::PublicKey::from_sec1_bytes(&sec1).map_err(invalid)?;
                Ok((
                    public_key.to_encoded_point(false).as_bytes().to_vec(),
                    public_key.to_encoded_point(true).as_bytes().to_vec(),
                ))
            }
            CurveScheme::P384 => {
                let public_key = p384::PublicKey::from_sec1_bytes(&sec1).map_err(invalid)?;
                Ok((
                    public_key.to_encoded_point(false).as_bytes().to_vec(),
                    public_key.to_encoded_point(true).as_bytes().to_vec(),
                ))
            }
            CurveScheme::P521 => {
                let public_key = p521::PublicKey::from_sec1_bytes(&sec1).map_err(invalid)?;
                Ok((
                    public_key.to_encoded_point(false).as_bytes().to_vec(),
                    public_key.to_encoded_point(true).as_bytes().to_vec(),
                ))
            }
        }
    }

    fn curve_type_value(&self) -> EllipticCurveType {
        match *self {
            CurveScheme::P256 => EllipticCurveType::NIST_P256,
            CurveScheme::P384 => EllipticCurveType::NIST_P384,
            CurveScheme::P521 => EllipticCurveType::NIST_P521,
        }
    }

    fn field_size_bytes(&self) -> usize {
        match *self {
            CurveScheme::P256 => 32,
            CurveScheme::P384 => 48,
            CurveScheme::P521 => 66,
        }
    }
}

fn public_point_from_sec1(sec1: &[u8], curve: EllipticCurveType) -> Result<EcPublicPoint> {
    // uncompressed SEC1 is 0x04 || x || y with equal-length coordinates
    if sec1.first() != Some(&SEC1_UNCOMPRESSED_PREFIX) || sec1.len() % 2 != 1 {
        return Err(Error::InvalidPublicKeyPoint(curve));
    }
    let size = (sec1.len() - 1) / 2;
    Ok(EcPublicPoint {
        x: Bytes::copy_from_slice(&sec1[1..1 + size]),
        y: Bytes::copy_from_slice(&sec1[1 + size..]),
    })
}

impl crate::crypto::provider::Curve for CurveScheme {
    fn curve_type(&self) -> EllipticCurveType {
        self.curve_type_value()
    }

    fn field_size(&self) -> usize {
        self.field_size_bytes()
    }

    fn generate_key_pair(&self, rand: &dyn Rand) -> Result<EcKeyPair> {
        let mut scalar = Zeroizing::new(vec![0u8; self.field_size_bytes()]);
        for _ in 0..MAX_SCALAR_SAMPLING_ATTEMPTS {
            self.sample_scalar(rand, &mut scalar)?;
            // zero and values not below the group order are rejected by from_slice
            let sampled = match *self {
                CurveScheme::P256 => p256::SecretKey::from_slice(&scalar).ok().map(|sk| {
                    (
                        Zeroizing::new(sk.to_bytes().to_vec()),
                        sk.public_key().to_encoded_point(false).as_bytes().to_vec(),
                    )
                }),
                CurveScheme::P384 => p384::SecretKey::from_slice(&scalar).ok().map(|sk| {
                    (
                        Zeroizing::new(sk.to_bytes().to_vec()),
                        sk.public_key().to_encoded_point(false).as_bytes().to_vec(),
                    )
                }),
                CurveScheme::P521 => p521::SecretKey::from_slice(&scalar).ok().map(|sk| {
                    (
                        Zeroizing::new(sk.to_bytes().to_vec()),
                        sk.public_key().to_encoded_point(false).as_bytes().to_vec(),
                    )
                }),
            };

            if let Some((private_key, sec1)) = sampled {
                return Ok(EcKeyPair {
                    curve: self.curve_type_value(),
                    private_key,
                    public_point: public_point_from_sec1(&sec1, self.curve_type_value())?,
                });
            }
        }

        Err(Error::ScalarSamplingFailed(self.curve_type_value()))
    }

    fn public_point(&self, private_key: &[u8]) -> Result<EcPublicPoint> {
        let scalar =
            pad_to_field_size(private_key, self.field_size_bytes()).ok_or(Error::InvalidPrivateKey)?;
        let sec1 = match *self {
            CurveScheme::P256 => p256::SecretKey::from_slice(&scalar)
                .map_err(|_| Error::InvalidPrivateKey)?
                .public_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            CurveScheme::P384 => p384::SecretKey::from_slice(&scalar)
                .map_err(|_| Error::InvalidPrivateKey)?
                .public_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            CurveScheme::P521 => p521::SecretKey::from_slice(&scalar)
                .map_err(|_| Error::InvalidPrivateKey)?
                .public_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
        };
        public_point_from_sec1(&sec1, self.curve_type_value())
    }

    fn validate_public_point(&self, x: &[u8], y: &[u8]) -> Result<()> {
        self.sec1_encodings(x, y)?;
        Ok(())
    }

    fn encode_point(&self, x: &[u8], y: &[u8], point_format: EcPointFormat) -> Result<Bytes> {
        let (uncompressed, compressed) = self.sec1_encodings(x, y)?;
        match point_format {
            EcPointFormat::UNCOMPRESSED => Ok(Bytes::from(uncompressed)),
            EcPointFormat::COMPRESSED => Ok(Bytes::from(compressed)),
            EcPointFormat::DO_NOT_USE_CRUNCHY_UNCOMPRESSED => {
                Ok(Bytes::copy_from_slice(&uncompressed[1..]))
            }
            _ => Err(Error::UnsupportedPointFormat(point_format)),
        }
    }
}
