use super::validation::validate_params;
use super::*;
use crate::key_manager::{KeyFactory, KeyManager};
use crate::key_template::{KeyData, KeyMaterialType};

/// Key manager for ECIES-AEAD-HKDF public keys.
///
/// Public keys are only ever projected from private keys, so its key factory refuses to
/// generate anything.
pub struct EciesAeadHkdfPublicKeyManager {
    crypto_provider: Arc<dyn CryptoProvider>,
    dem_registry: Arc<Registry<dyn AeadKeyManager>>,
}

impl EciesAeadHkdfPublicKeyManager {
    pub fn new(crypto_provider: Arc<dyn CryptoProvider>) -> Result<Self> {
        let dem_registry = Arc::new(aead::registry(crypto_provider.clone())?);
        Ok(Self::with_dem_registry(crypto_provider, dem_registry))
    }

    pub fn with_dem_registry(
        crypto_provider: Arc<dyn CryptoProvider>,
        dem_registry: Arc<Registry<dyn AeadKeyManager>>,
    ) -> Self {
        Self {
            crypto_provider,
            dem_registry,
        }
    }

    /// Deserialize and fully validate a public key
    pub fn parse_public_key(&self, serialized_key: &[u8]) -> Result<EciesAeadHkdfPublicKey> {
        let key = EciesAeadHkdfPublicKey::deserialize_exact(serialized_key)?;
        if key.version > ECIES_AEAD_HKDF_PUBLIC_KEY_VERSION {
            return Err(Error::InvalidKeyVersion(key.version));
        }
        validate_params(&key.params, self.crypto_provider.as_ref(), &self.dem_registry)?;
        self.crypto_provider
            .curve(key.params.kem_params.curve_type)?
            .validate_public_point(&key.x, &key.y)?;
        Ok(key)
    }
}

impl KeyFactory for EciesAeadHkdfPublicKeyManager {
    fn validate_key_format(&self, _serialized_key_format: &[u8]) -> Result<()> {
        Err(Error::KeyGenerationNotSupported(
            ECIES_AEAD_HKDF_PUBLIC_KEY_TYPE_URL.to_string(),
        ))
    }

    fn new_key(&self, _serialized_key_format: &[u8]) -> Result<Bytes> {
        Err(Error::KeyGenerationNotSupported(
            ECIES_AEAD_HKDF_PUBLIC_KEY_TYPE_URL.to_string(),
        ))
    }

    fn new_key_data(&self, _serialized_key_format: &[u8]) -> Result<KeyData> {
        Err(Error::KeyGenerationNotSupported(
            ECIES_AEAD_HKDF_PUBLIC_KEY_TYPE_URL.to_string(),
        ))
    }
}

impl KeyManager for EciesAeadHkdfPublicKeyManager {
    fn key_type(&self) -> &str {
        ECIES_AEAD_HKDF_PUBLIC_KEY_TYPE_URL
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::ASYMMETRIC_PUBLIC
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }

    fn validate_key(&self, serialized_key: &[u8]) -> Result<()> {
        self.parse_public_key(serialized_key)?;
        Ok(())
    }
}
