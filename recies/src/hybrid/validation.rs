use log::warn;

use super::*;

/// Check that `hash` is strong enough to derive DEM keys from a shared secret on `curve`.
///
/// SHA-1 and SHA-224 are never accepted. Otherwise half the digest size must reach the curve's
/// security level: P-256 takes SHA-256 and up, P-384 takes SHA-384 and up, P-521 only SHA-512.
pub(crate) fn validate_hkdf_hash(curve: EllipticCurveType, hash: HashType) -> Result<()> {
    let digest_size = match hash {
        HashType::SHA256 | HashType::SHA384 | HashType::SHA512 => hash.digest_size(),
        HashType::SHA1 | HashType::SHA224 | HashType::UNKNOWN_HASH | HashType::Unknown(_) => None,
    }
    .ok_or(Error::UnsupportedHashType(hash))?;
    let security_bits = curve
        .security_bits()
        .ok_or(Error::UnsupportedEllipticCurve(curve))?;

    if digest_size * 4 < security_bits {
        return Err(Error::HashTooWeakForCurve { curve, hash });
    }
    Ok(())
}

/// Validate hybrid parameters against the provider's curves and the registered DEMs.
///
/// The DEM template is only resolved once the KEM parameters pass.
pub(crate) fn validate_params(
    params: &EciesAeadHkdfParams,
    crypto_provider: &dyn CryptoProvider,
    dem_registry: &Registry<dyn AeadKeyManager>,
) -> Result<EciesAeadHkdfDemHelper> {
    let result = validate_kem_params(params, crypto_provider)
        .and_then(|_| EciesAeadHkdfDemHelper::new(&params.dem_params.aead_dem, dem_registry));
    if let Err(err) = &result {
        warn!(
            "rejected ECIES-AEAD-HKDF parameters (curve {}, hash {}, point format {}, dem {}): {err}",
            params.kem_params.curve_type,
            params.kem_params.hkdf_hash_type,
            params.ec_point_format,
            params.dem_params.aead_dem.type_url
        );
    }
    result
}

fn validate_kem_params(
    params: &EciesAeadHkdfParams,
    crypto_provider: &dyn CryptoProvider,
) -> Result<()> {
    let curve = params.kem_params.curve_type;
    if !crypto_provider.supports(curve) {
        return Err(Error::UnsupportedEllipticCurve(curve));
    }
    validate_hkdf_hash(curve, params.kem_params.hkdf_hash_type)?;
    if !crypto_provider.supports_point_format(curve, params.ec_point_format) {
        return Err(Error::UnsupportedPointFormat(params.ec_point_format));
    }
    Ok(())
}
