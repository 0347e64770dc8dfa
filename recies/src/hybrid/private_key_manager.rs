use log::debug;

use super::validation::validate_params;
use super::*;
use crate::crypto::provider::pad_to_field_size;
use crate::key_manager::{KeyFactory, KeyManager, PrivateKeyManager};
use crate::key_template::{KeyData, KeyMaterialType};

/// EciesAeadHkdfKeyFactory validates hybrid key formats and generates private keys for them
pub struct EciesAeadHkdfKeyFactory {
    crypto_provider: Arc<dyn CryptoProvider>,
    dem_registry: Arc<Registry<dyn AeadKeyManager>>,
}

impl EciesAeadHkdfKeyFactory {
    fn parse_and_validate(
        &self,
        serialized_key_format: &[u8],
    ) -> Result<(EciesAeadHkdfKeyFormat, EciesAeadHkdfDemHelper)> {
        let key_format = EciesAeadHkdfKeyFormat::deserialize_exact(serialized_key_format)?;
        let dem_helper = validate_params(
            &key_format.params,
            self.crypto_provider.as_ref(),
            &self.dem_registry,
        )?;
        Ok((key_format, dem_helper))
    }

    /// Generate a fresh private key conforming to the serialized key format.
    ///
    /// The public key is derived from the generated scalar and carries the format's parameters
    /// unchanged.
    pub fn new_private_key(&self, serialized_key_format: &[u8]) -> Result<EciesAeadHkdfPrivateKey> {
        let (key_format, dem_helper) = self.parse_and_validate(serialized_key_format)?;
        let params = key_format.params;

        let key_pair = self
            .crypto_provider
            .generate_key_pair(params.kem_params.curve_type)?;
        debug!(
            "generated {} key on {} with {}-byte DEM key from {}",
            ECIES_AEAD_HKDF_PRIVATE_KEY_TYPE_URL,
            key_pair.curve(),
            dem_helper.symmetric_key_size(),
            dem_helper.dem_template().type_url
        );

        Ok(EciesAeadHkdfPrivateKey {
            version: ECIES_AEAD_HKDF_PRIVATE_KEY_VERSION,
            public_key: EciesAeadHkdfPublicKey {
                version: ECIES_AEAD_HKDF_PUBLIC_KEY_VERSION,
                params,
                x: key_pair.public_point().x().clone(),
                y: key_pair.public_point().y().clone(),
            },
            key_value: Bytes::copy_from_slice(key_pair.private_key()),
        })
    }
}

impl KeyFactory for EciesAeadHkdfKeyFactory {
    fn validate_key_format(&self, serialized_key_format: &[u8]) -> Result<()> {
        self.parse_and_validate(serialized_key_format)?;
        Ok(())
    }

    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Bytes> {
        self.new_private_key(serialized_key_format)?
            .serialize_detached()
    }

    fn new_key_data(&self, serialized_key_format: &[u8]) -> Result<KeyData> {
        Ok(KeyData {
            type_url: ECIES_AEAD_HKDF_PRIVATE_KEY_TYPE_URL.to_string(),
            value: self.new_key(serialized_key_format)?,
            key_material_type: KeyMaterialType::ASYMMETRIC_PRIVATE,
        })
    }
}

/// Key manager for ECIES-AEAD-HKDF private keys
pub struct EciesAeadHkdfPrivateKeyManager {
    key_factory: EciesAeadHkdfKeyFactory,
}

impl EciesAeadHkdfPrivateKeyManager {
    /// Create a manager whose DEM templates resolve to this crate's AEAD key managers
    pub fn new(crypto_provider: Arc<dyn CryptoProvider>) -> Result<Self> {
        let dem_registry = Arc::new(aead::registry(crypto_provider.clone())?);
        Ok(Self::with_dem_registry(crypto_provider, dem_registry))
    }

    /// Create a manager that resolves DEM templates through `dem_registry`
    pub fn with_dem_registry(
        crypto_provider: Arc<dyn CryptoProvider>,
        dem_registry: Arc<Registry<dyn AeadKeyManager>>,
    ) -> Self {
        Self {
            key_factory: EciesAeadHkdfKeyFactory {
                crypto_provider,
                dem_registry,
            },
        }
    }

    /// Returns the typed key factory
    pub fn ecies_key_factory(&self) -> &EciesAeadHkdfKeyFactory {
        &self.key_factory
    }

    /// Deserialize and fully validate a private key
    pub fn parse_private_key(&self, serialized_key: &[u8]) -> Result<EciesAeadHkdfPrivateKey> {
        let key = EciesAeadHkdfPrivateKey::deserialize_exact(serialized_key)?;
        if key.version > ECIES_AEAD_HKDF_PRIVATE_KEY_VERSION {
            return Err(Error::InvalidKeyVersion(key.version));
        }
        if key.public_key.version > ECIES_AEAD_HKDF_PUBLIC_KEY_VERSION {
            return Err(Error::InvalidKeyVersion(key.public_key.version));
        }
        let crypto_provider = self.key_factory.crypto_provider.as_ref();
        validate_params(key.params(), crypto_provider, &self.key_factory.dem_registry)?;

        let curve = crypto_provider.curve(key.params().kem_params.curve_type)?;
        let field_size = curve.field_size();
        // scalars may carry leading zero bytes, e.g. a two's-complement sign byte
        let scalar =
            pad_to_field_size(&key.key_value, field_size).ok_or(Error::InvalidPrivateKey)?;
        curve.validate_public_point(&key.public_key.x, &key.public_key.y)?;

        let public_point = curve.public_point(&scalar)?;
        let same_coordinate = |stored: &[u8], derived: &[u8]| {
            pad_to_field_size(stored, field_size).is_some_and(|padded| padded.as_slice() == derived)
        };
        if !same_coordinate(&key.public_key.x[..], &public_point.x()[..])
            || !same_coordinate(&key.public_key.y[..], &public_point.y()[..])
        {
            return Err(Error::PrivateKeyMismatch);
        }
        Ok(key)
    }
}

impl KeyManager for EciesAeadHkdfPrivateKeyManager {
    fn key_type(&self) -> &str {
        ECIES_AEAD_HKDF_PRIVATE_KEY_TYPE_URL
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::ASYMMETRIC_PRIVATE
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &self.key_factory
    }

    fn validate_key(&self, serialized_key: &[u8]) -> Result<()> {
        self.parse_private_key(serialized_key)?;
        Ok(())
    }
}

impl PrivateKeyManager for EciesAeadHkdfPrivateKeyManager {
    fn public_key_data(&self, serialized_private_key: &[u8]) -> Result<KeyData> {
        let key = self.parse_private_key(serialized_private_key)?;
        Ok(KeyData {
            type_url: ECIES_AEAD_HKDF_PUBLIC_KEY_TYPE_URL.to_string(),
            value: key.public_key().serialize_detached()?,
            key_material_type: KeyMaterialType::ASYMMETRIC_PUBLIC,
        })
    }
}
