//! Named ECIES-AEAD-HKDF key templates and the builder behind them.
//!
//! Named templates always use uncompressed points, an empty HKDF salt and the TINK output
//! prefix. Any other combination goes through [`EciesAeadHkdfTemplateBuilder`].

use super::*;
use crate::aead::templates as aead_templates;
use crate::key_template::OutputPrefixType;

/// P-256, HKDF-SHA256, AES-128-GCM
pub fn ecies_p256_hkdf_hmac_sha256_aes128_gcm() -> KeyTemplate {
    EciesAeadHkdfTemplateBuilder::new()
        .with_curve(EllipticCurveType::NIST_P256)
        .with_hash(HashType::SHA256)
        .with_dem(aead_templates::aes128_gcm())
        .build()
}

/// P-256, HKDF-SHA256, AES-128-CTR with HMAC-SHA256
pub fn ecies_p256_hkdf_hmac_sha256_aes128_ctr_hmac_sha256() -> KeyTemplate {
    EciesAeadHkdfTemplateBuilder::new()
        .with_curve(EllipticCurveType::NIST_P256)
        .with_hash(HashType::SHA256)
        .with_dem(aead_templates::aes128_ctr_hmac_sha256())
        .build()
}

/// P-384, HKDF-SHA384, AES-256-GCM
pub fn ecies_p384_hkdf_hmac_sha384_aes256_gcm() -> KeyTemplate {
    EciesAeadHkdfTemplateBuilder::new()
        .with_curve(EllipticCurveType::NIST_P384)
        .with_hash(HashType::SHA384)
        .with_dem(aead_templates::aes256_gcm())
        .build()
}

/// P-521, HKDF-SHA512, AES-256-GCM
pub fn ecies_p521_hkdf_hmac_sha512_aes256_gcm() -> KeyTemplate {
    EciesAeadHkdfTemplateBuilder::new()
        .with_curve(EllipticCurveType::NIST_P521)
        .with_hash(HashType::SHA512)
        .with_dem(aead_templates::aes256_gcm())
        .build()
}

/// Create a TINK-prefixed template for an arbitrary parameter combination.
///
/// Nothing is validated here; the private key manager rejects unsupported combinations when a
/// key is generated.
pub fn create_ecies_aead_hkdf_key_template(
    curve: EllipticCurveType,
    hash: HashType,
    point_format: EcPointFormat,
    dem: KeyTemplate,
    salt: &[u8],
) -> KeyTemplate {
    EciesAeadHkdfTemplateBuilder::new()
        .with_curve(curve)
        .with_hash(hash)
        .with_point_format(point_format)
        .with_dem(dem)
        .with_salt(Bytes::copy_from_slice(salt))
        .build()
}

#[derive(Debug, Clone)]
pub struct EciesAeadHkdfTemplateBuilder {
    curve: EllipticCurveType,
    hash: HashType,
    point_format: EcPointFormat,
    dem: KeyTemplate,
    salt: Bytes,
    output_prefix_type: OutputPrefixType,
}

impl Default for EciesAeadHkdfTemplateBuilder {
    fn default() -> Self {
        Self {
            curve: EllipticCurveType::NIST_P256,
            hash: HashType::SHA256,
            point_format: EcPointFormat::UNCOMPRESSED,
            dem: aead_templates::aes128_gcm(),
            salt: Bytes::new(),
            output_prefix_type: OutputPrefixType::TINK,
        }
    }
}

impl EciesAeadHkdfTemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_curve(mut self, curve: EllipticCurveType) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_hash(mut self, hash: HashType) -> Self {
        self.hash = hash;
        self
    }

    pub fn with_point_format(mut self, point_format: EcPointFormat) -> Self {
        self.point_format = point_format;
        self
    }

    pub fn with_dem(mut self, dem: KeyTemplate) -> Self {
        self.dem = dem;
        self
    }

    pub fn with_salt(mut self, salt: Bytes) -> Self {
        self.salt = salt;
        self
    }

    pub fn with_output_prefix_type(mut self, output_prefix_type: OutputPrefixType) -> Self {
        self.output_prefix_type = output_prefix_type;
        self
    }

    pub fn build(self) -> KeyTemplate {
        let key_format = EciesAeadHkdfKeyFormat {
            params: EciesAeadHkdfParams {
                kem_params: EciesHkdfKemParams {
                    curve_type: self.curve,
                    hkdf_hash_type: self.hash,
                    hkdf_salt: self.salt,
                },
                dem_params: EciesAeadDemParams { aead_dem: self.dem },
                ec_point_format: self.point_format,
            },
        };
        KeyTemplate::from_key_format(
            ECIES_AEAD_HKDF_PRIVATE_KEY_TYPE_URL,
            &key_format,
            self.output_prefix_type,
        )
    }
}
