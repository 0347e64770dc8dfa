mod curve;

use self::curve::CurveScheme;
use super::*;

static CURVES: [CurveScheme; 3] = [CurveScheme::P256, CurveScheme::P384, CurveScheme::P521];

/// CryptoProvider backed by the RustCrypto `p256`, `p384` and `p521` crates
pub struct RustCryptoProvider {
    rand: Box<dyn Rand>,
}

impl Default for RustCryptoProvider {
    fn default() -> Self {
        Self {
            rand: Box::new(OsRand),
        }
    }
}

impl RustCryptoProvider {
    /// Create a provider that draws randomness from `rand` instead of the operating system
    pub fn with_rand(rand: impl Rand + 'static) -> Self {
        Self {
            rand: Box::new(rand),
        }
    }
}

impl CryptoProvider for RustCryptoProvider {
    fn supports(&self, curve: EllipticCurveType) -> bool {
        matches!(
            curve,
            EllipticCurveType::NIST_P256 | EllipticCurveType::NIST_P384 | EllipticCurveType::NIST_P521
        )
    }

    fn supported(&self) -> Vec<EllipticCurveType> {
        CURVES.iter().map(|c| c.curve_type()).collect()
    }

    fn rand(&self) -> &dyn Rand {
        self.rand.as_ref()
    }

    fn curve(&self, curve: EllipticCurveType) -> Result<&dyn Curve> {
        match curve {
            EllipticCurveType::NIST_P256 => Ok(&CURVES[0]),
            EllipticCurveType::NIST_P384 => Ok(&CURVES[1]),
            EllipticCurveType::NIST_P521 => Ok(&CURVES[2]),
            _ => Err(Error::UnsupportedEllipticCurve(curve)),
        }
    }
}
