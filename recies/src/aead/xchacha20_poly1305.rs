use bytes::{Buf, BufMut, Bytes};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::*;

const XCHACHA20_POLY1305_KEY_SIZE: usize = 32;

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct XChaCha20Poly1305KeyFormat {
    pub version: u32,
}

impl Deserializer for XChaCha20Poly1305KeyFormat {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key_format = XChaCha20Poly1305KeyFormat::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key_format.version = deserialize_uint32(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key_format)
    }
}

impl Serializer for XChaCha20Poly1305KeyFormat {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.version, buf)
    }
}

#[derive(Default, Clone, Eq, PartialEq)]
pub struct XChaCha20Poly1305Key {
    pub version: u32,
    pub key_value: Bytes,
}

impl Debug for XChaCha20Poly1305Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XChaCha20Poly1305Key")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Deserializer for XChaCha20Poly1305Key {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key = XChaCha20Poly1305Key::default();
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

impl Serializer for XChaCha20Poly1305Key {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.version, buf)?;
        serialize_opaque_vec(3, &self.key_value, buf)
    }
}

fn validate_xchacha20_poly1305_version(version: u32) -> Result<()> {
    if version > XCHACHA20_POLY1305_KEY_VERSION {
        return Err(Error::InvalidKeyVersion(version));
    }
    Ok(())
}

/// Key manager for XChaCha20-Poly1305 keys
pub struct XChaCha20Poly1305KeyManager {
    crypto_provider: Arc<dyn CryptoProvider>,
}

impl XChaCha20Poly1305KeyManager {
    pub fn new(crypto_provider: Arc<dyn CryptoProvider>) -> Self {
        Self { crypto_provider }
    }

    /// Generate a key conforming to the key format
    pub fn generate(&self, key_format: &XChaCha20Poly1305KeyFormat) -> Result<XChaCha20Poly1305Key> {
        validate_xchacha20_poly1305_version(key_format.version)?;

        let mut key_value = Zeroizing::new(vec![0u8; XCHACHA20_POLY1305_KEY_SIZE]);
        self.crypto_provider.rand().fill(&mut key_value)?;
        debug!("generated XChaCha20-Poly1305 key");

        Ok(XChaCha20Poly1305Key {
            version: XCHACHA20_POLY1305_KEY_VERSION,
            key_value: Bytes::copy_from_slice(&key_value),
        })
    }
}

impl KeyFactory for XChaCha20Poly1305KeyManager {
    fn validate_key_format(&self, serialized_key_format: &[u8]) -> Result<()> {
        let key_format = XChaCha20Poly1305KeyFormat::deserialize_exact(serialized_key_format)?;
        validate_xchacha20_poly1305_version(key_format.version)
    }

    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Bytes> {
        let key_format = XChaCha20Poly1305KeyFormat::deserialize_exact(serialized_key_format)?;
        self.generate(&key_format)?.serialize_detached()
    }

    fn new_key_data(&self, serialized_key_format: &[u8]) -> Result<KeyData> {
        Ok(KeyData {
            type_url: XCHACHA20_POLY1305_TYPE_URL.to_string(),
            value: self.new_key(serialized_key_format)?,
            key_material_type: KeyMaterialType::SYMMETRIC,
        })
    }
}

impl KeyManager for XChaCha20Poly1305KeyManager {
    fn key_type(&self) -> &str {
        XCHACHA20_POLY1305_TYPE_URL
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::SYMMETRIC
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }

    fn validate_key(&self, serialized_key: &[u8]) -> Result<()> {
        let key = XChaCha20Poly1305Key::deserialize_exact(serialized_key)?;
        validate_xchacha20_poly1305_version(key.version)?;
        if key.key_value.len() != XCHACHA20_POLY1305_KEY_SIZE {
            return Err(Error::InvalidKeySize {
                name: "XChaCha20-Poly1305",
                size: key.key_value.len(),
            });
        }
        Ok(())
    }
}

impl AeadKeyManager for XChaCha20Poly1305KeyManager {
    fn symmetric_key_size(&self, serialized_key_format: &[u8]) -> Result<usize> {
        self.validate_key_format(serialized_key_format)?;
        Ok(XCHACHA20_POLY1305_KEY_SIZE)
    }
}
