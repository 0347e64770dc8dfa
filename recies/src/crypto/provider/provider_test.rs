#[cfg(feature = "RustCryptoProvider")]
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::crypto::provider::Rand;

struct FailingRand;

impl Rand for FailingRand {
    fn fill(&self, _buf: &mut [u8]) -> Result<()> {
        Err(Error::RandomnessUnavailable("entropy source closed".to_string()))
    }
}

// Draws one out-of-range scalar, then the source fails.
#[cfg(feature = "RustCryptoProvider")]
#[derive(Default)]
struct ExhaustedRand {
    draws: AtomicUsize,
}

#[cfg(feature = "RustCryptoProvider")]
impl Rand for ExhaustedRand {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        if self.draws.fetch_add(1, Ordering::SeqCst) > 0 {
            return Err(Error::RandomnessUnavailable("entropy source closed".to_string()));
        }
        buf.fill(0xFF);
        Ok(())
    }
}

// Always produces an all-zero scalar, which no curve accepts.
struct ZeroRand;

impl Rand for ZeroRand {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        buf.fill(0);
        Ok(())
    }
}

#[test]
fn test_pad_to_field_size() {
    assert_eq!(pad_to_field_size(&[1, 2], 4).as_deref(), Some(&vec![0, 0, 1, 2]));
    assert_eq!(
        pad_to_field_size(&[0, 0, 0, 1, 2], 4).as_deref(),
        Some(&vec![0, 0, 1, 2])
    );
    assert_eq!(pad_to_field_size(&[1, 2, 3, 4, 5], 4).as_deref(), None);
    assert_eq!(pad_to_field_size(&[0, 1, 2, 3, 4, 5], 4).as_deref(), None);
    assert_eq!(pad_to_field_size(&[], 2).as_deref(), Some(&vec![0, 0]));
}

#[test]
fn test_rand_chacha_from_seed() -> Result<()> {
    let a = RandChacha::from_seed([7u8; 32]);
    let b = RandChacha::from_seed([7u8; 32]);

    let mut out_a = [0u8; 48];
    let mut out_b = [0u8; 48];
    a.fill(&mut out_a)?;
    b.fill(&mut out_b)?;
    assert_eq!(out_a, out_b);

    a.fill(&mut out_a)?;
    assert_ne!(out_a, out_b, "stream must advance between calls");

    Ok(())
}

#[test]
fn test_os_rand() -> Result<()> {
    let mut out = [0u8; 32];
    OsRand.fill(&mut out)?;
    assert_ne!(out, [0u8; 32]);
    Ok(())
}

#[cfg(feature = "RustCryptoProvider")]
fn test_key_pair_with_crypto_provider(crypto_provider: &impl CryptoProvider) -> Result<()> {
    for curve in crypto_provider.supported() {
        let c = crypto_provider.curve(curve)?;
        let field_size = curve.field_size().unwrap_or_default();
        assert_eq!(c.field_size(), field_size);

        let key_pair = crypto_provider.generate_key_pair(curve)?;
        assert_eq!(key_pair.curve(), curve);
        assert_eq!(key_pair.private_key().len(), field_size);
        assert_eq!(key_pair.public_point().x().len(), field_size);
        assert_eq!(key_pair.public_point().y().len(), field_size);

        let public_point = c.public_point(key_pair.private_key())?;
        assert_eq!(&public_point, key_pair.public_point());

        let (x, y) = (public_point.x(), public_point.y());
        c.validate_public_point(x, y)?;

        let uncompressed = c.encode_point(x, y, EcPointFormat::UNCOMPRESSED)?;
        assert_eq!(uncompressed.len(), 1 + 2 * field_size);
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(&uncompressed[1..1 + field_size], x.as_ref());

        let compressed = c.encode_point(x, y, EcPointFormat::COMPRESSED)?;
        assert_eq!(compressed.len(), 1 + field_size);
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);
        assert_eq!(&compressed[1..], x.as_ref());

        let crunchy = c.encode_point(x, y, EcPointFormat::DO_NOT_USE_CRUNCHY_UNCOMPRESSED)?;
        assert_eq!(crunchy.as_ref(), &uncompressed[1..]);

        assert!(matches!(
            c.encode_point(x, y, EcPointFormat::UNKNOWN_FORMAT),
            Err(Error::UnsupportedPointFormat(_))
        ));

        // flipping a bit of y moves the point off the curve
        let mut bad_y = y.to_vec();
        let last = bad_y.len() - 1;
        bad_y[last] ^= 0x01;
        let err = c.validate_public_point(x, &bad_y).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    Ok(())
}

#[cfg(feature = "RustCryptoProvider")]
#[test]
fn test_key_pair() -> Result<()> {
    test_key_pair_with_crypto_provider(&RustCryptoProvider::default())?;
    test_key_pair_with_crypto_provider(&RustCryptoProvider::with_rand(RandChacha::default()))?;

    Ok(())
}

#[cfg(feature = "RustCryptoProvider")]
#[test]
fn test_key_pair_is_reproducible_from_seed() -> Result<()> {
    let a = RustCryptoProvider::with_rand(RandChacha::from_seed([42u8; 32]));
    let b = RustCryptoProvider::with_rand(RandChacha::from_seed([42u8; 32]));

    let key_pair_a = a.generate_key_pair(EllipticCurveType::NIST_P256)?;
    let key_pair_b = b.generate_key_pair(EllipticCurveType::NIST_P256)?;
    assert_eq!(key_pair_a, key_pair_b);

    let key_pair_c = a.generate_key_pair(EllipticCurveType::NIST_P256)?;
    assert_ne!(key_pair_a.private_key(), key_pair_c.private_key());

    Ok(())
}

#[cfg(feature = "RustCryptoProvider")]
#[test]
fn test_unsupported_curve() {
    let crypto_provider = RustCryptoProvider::default();
    for curve in [
        EllipticCurveType::UNKNOWN_CURVE,
        EllipticCurveType::CURVE25519,
        EllipticCurveType::Unknown(42),
    ] {
        assert!(!crypto_provider.supports(curve));
        assert!(!crypto_provider.supports_point_format(curve, EcPointFormat::UNCOMPRESSED));
        assert!(matches!(
            crypto_provider.generate_key_pair(curve),
            Err(Error::UnsupportedEllipticCurve(c)) if c == curve
        ));
    }
}

#[cfg(feature = "RustCryptoProvider")]
#[test]
fn test_randomness_failure_is_surfaced() {
    let crypto_provider = RustCryptoProvider::with_rand(FailingRand);
    let err = crypto_provider
        .generate_key_pair(EllipticCurveType::NIST_P256)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RandomnessUnavailable);

    let crypto_provider = RustCryptoProvider::with_rand(ZeroRand);
    let err = crypto_provider
        .generate_key_pair(EllipticCurveType::NIST_P384)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ScalarSamplingFailed(EllipticCurveType::NIST_P384)
    ));
    assert_eq!(err.kind(), ErrorKind::RandomnessUnavailable);
}

#[cfg(feature = "RustCryptoProvider")]
#[test]
fn test_invalid_private_key() {
    let crypto_provider = RustCryptoProvider::default();
    let Ok(curve) = crypto_provider.curve(EllipticCurveType::NIST_P256) else {
        panic!("P-256 must be supported");
    };
    assert!(matches!(
        curve.public_point(&[0u8; 32]),
        Err(Error::InvalidPrivateKey)
    ));
    assert!(matches!(
        curve.public_point(&[0xFFu8; 33]),
        Err(Error::InvalidPrivateKey)
    ));
}

#[cfg(feature = "RustCryptoProvider")]
#[test]
fn test_generate_key_pair_rand_fails_after_rejected_draw() {
    let crypto_provider = RustCryptoProvider::default();
    let Ok(curve) = crypto_provider.curve(EllipticCurveType::NIST_P256) else {
        panic!("P-256 must be supported");
    };
    let rand = ExhaustedRand::default();
    let err = curve.generate_key_pair(&rand).unwrap_err();
    assert!(matches!(err, Error::RandomnessUnavailable(_)));
    assert_eq!(rand.draws.load(Ordering::SeqCst), 2);
}
