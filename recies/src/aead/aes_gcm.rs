use bytes::{Buf, BufMut, Bytes};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::*;

/// AES-GCM key format
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct AesGcmKeyFormat {
    pub key_size: u32,
    pub version: u32,
}

impl Deserializer for AesGcmKeyFormat {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key_format = AesGcmKeyFormat::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                2 => key_format.key_size = deserialize_uint32(field, wire_type, b)?,
                3 => key_format.version = deserialize_uint32(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key_format)
    }
}

impl Serializer for AesGcmKeyFormat {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(2, self.key_size, buf)?;
        serialize_uint32(3, self.version, buf)
    }
}

/// AES-GCM key
#[derive(Default, Clone, Eq, PartialEq)]
pub struct AesGcmKey {
    pub version: u32,
    pub key_value: Bytes,
}

impl Debug for AesGcmKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmKey")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Deserializer for AesGcmKey {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key = AesGcmKey::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key.version = deserialize_uint32(field, wire_type, b)?,
                3 => key.key_value = deserialize_opaque_vec(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key)
    }
}

impl Serializer for AesGcmKey {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.version, buf)?;
        serialize_opaque_vec(3, &self.key_value, buf)
    }
}

pub(super) fn validate_aes_gcm_key_size(size: usize) -> Result<()> {
    match size {
        16 | 32 => Ok(()),
        _ => Err(Error::InvalidKeySize {
            name: "AES-GCM",
            size,
        }),
    }
}

/// Key manager for AES-GCM keys
pub struct AesGcmKeyManager {
    crypto_provider: Arc<dyn CryptoProvider>,
}

impl AesGcmKeyManager {
    pub fn new(crypto_provider: Arc<dyn CryptoProvider>) -> Self {
        Self { crypto_provider }
    }

    /// Generate a key conforming to the key format
    pub fn generate(&self, key_format: &AesGcmKeyFormat) -> Result<AesGcmKey> {
        validate_aes_gcm_key_size(key_format.key_size as usize)?;

        let mut key_value = Zeroizing::new(vec![0u8; key_format.key_size as usize]);
        self.crypto_provider.rand().fill(&mut key_value)?;
        debug!("generated {}-bit AES-GCM key", key_format.key_size * 8);

        Ok(AesGcmKey {
            version: AES_GCM_KEY_VERSION,
            key_value: Bytes::copy_from_slice(&key_value),
        })
    }
}

impl KeyFactory for AesGcmKeyManager {
    fn validate_key_format(&self, serialized_key_format: &[u8]) -> Result<()> {
        let key_format = AesGcmKeyFormat::deserialize_exact(serialized_key_format)?;
        validate_aes_gcm_key_size(key_format.key_size as usize)
    }

    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Bytes> {
        let key_format = AesGcmKeyFormat::deserialize_exact(serialized_key_format)?;
        self.generate(&key_format)?.serialize_detached()
    }

    fn new_key_data(&self, serialized_key_format: &[u8]) -> Result<KeyData> {
        Ok(KeyData {
            type_url: AES_GCM_TYPE_URL.to_string(),
            value: self.new_key(serialized_key_format)?,
            key_material_type: KeyMaterialType::SYMMETRIC,
        })
    }
}

impl KeyManager for AesGcmKeyManager {
    fn key_type(&self) -> &str {
        AES_GCM_TYPE_URL
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::SYMMETRIC
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }

    fn validate_key(&self, serialized_key: &[u8]) -> Result<()> {
        let key = AesGcmKey::deserialize_exact(serialized_key)?;
        if key.version > AES_GCM_KEY_VERSION {
            return Err(Error::InvalidKeyVersion(key.version));
        }
        validate_aes_gcm_key_size(key.key_value.len())
    }
}

impl AeadKeyManager for AesGcmKeyManager {
    fn symmetric_key_size(&self, serialized_key_format: &[u8]) -> Result<usize> {
        let key_format = AesGcmKeyFormat::deserialize_exact(serialized_key_format)?;
        validate_aes_gcm_key_size(key_format.key_size as usize)?;
        Ok(key_format.key_size as usize)
    }
}
