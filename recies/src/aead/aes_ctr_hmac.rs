use bytes::{Buf, BufMut, Bytes};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::*;
use crate::crypto::HashType;

const MIN_AES_CTR_IV_SIZE: u32 = 12;
const MAX_AES_CTR_IV_SIZE: u32 = 16;
const MIN_HMAC_KEY_SIZE: usize = 16;
const MIN_HMAC_TAG_SIZE: u32 = 10;

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct AesCtrParams {
    pub iv_size: u32,
}

impl Deserializer for AesCtrParams {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut params = AesCtrParams::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => params.iv_size = deserialize_uint32(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(params)
    }
}

impl Serializer for AesCtrParams {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.iv_size, buf)
    }
}

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct AesCtrKeyFormat {
    pub params: AesCtrParams,
    pub key_size: u32,
}

impl Deserializer for AesCtrKeyFormat {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key_format = AesCtrKeyFormat::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key_format.params = deserialize_message(field, wire_type, b)?,
                2 => key_format.key_size = deserialize_uint32(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key_format)
    }
}

impl Serializer for AesCtrKeyFormat {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_message(1, &self.params, buf)?;
        serialize_uint32(2, self.key_size, buf)
    }
}

#[derive(Default, Clone, Eq, PartialEq)]
pub struct AesCtrKey {
    pub version: u32,
    pub params: AesCtrParams,
    pub key_value: Bytes,
}

impl Debug for AesCtrKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesCtrKey")
            .field("version", &self.version)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Deserializer for AesCtrKey {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key = AesCtrKey::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key.version = deserialize_uint32(field, wire_type, b)?,
                2 => key.params = deserialize_message(field, wire_type, b)?,
                3 => key.key_value = deserialize_opaque_vec(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key)
    }
}

impl Serializer for AesCtrKey {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.version, buf)?;
        serialize_message(2, &self.params, buf)?;
        serialize_opaque_vec(3, &self.key_value, buf)
    }
}

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct HmacParams {
    pub hash: HashType,
    pub tag_size: u32,
}

impl Deserializer for HmacParams {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut params = HmacParams::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => params.hash = deserialize_uint32(field, wire_type, b)?.into(),
                2 => params.tag_size = deserialize_uint32(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(params)
    }
}

impl Serializer for HmacParams {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.hash.into(), buf)?;
        serialize_uint32(2, self.tag_size, buf)
    }
}

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct HmacKeyFormat {
    pub params: HmacParams,
    pub key_size: u32,
    pub version: u32,
}

impl Deserializer for HmacKeyFormat {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key_format = HmacKeyFormat::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key_format.params = deserialize_message(field, wire_type, b)?,
                2 => key_format.key_size = deserialize_uint32(field, wire_type, b)?,
                3 => key_format.version = deserialize_uint32(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key_format)
    }
}

impl Serializer for HmacKeyFormat {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_message(1, &self.params, buf)?;
        serialize_uint32(2, self.key_size, buf)?;
        serialize_uint32(3, self.version, buf)
    }
}

#[derive(Default, Clone, Eq, PartialEq)]
pub struct HmacKey {
    pub version: u32,
    pub params: HmacParams,
    pub key_value: Bytes,
}

impl Debug for HmacKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacKey")
            .field("version", &self.version)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Deserializer for HmacKey {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key = HmacKey::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key.version = deserialize_uint32(field, wire_type, b)?,
                2 => key.params = deserialize_message(field, wire_type, b)?,
                3 => key.key_value = deserialize_opaque_vec(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key)
    }
}

impl Serializer for HmacKey {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.version, buf)?;
        serialize_message(2, &self.params, buf)?;
        serialize_opaque_vec(3, &self.key_value, buf)
    }
}

/// AES-CTR-HMAC AEAD key format: an AES-CTR key format and an HMAC key format
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct AesCtrHmacAeadKeyFormat {
    pub aes_ctr_key_format: AesCtrKeyFormat,
    pub hmac_key_format: HmacKeyFormat,
}

impl Deserializer for AesCtrHmacAeadKeyFormat {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key_format = AesCtrHmacAeadKeyFormat::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key_format.aes_ctr_key_format = deserialize_message(field, wire_type, b)?,
                2 => key_format.hmac_key_format = deserialize_message(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key_format)
    }
}

impl Serializer for AesCtrHmacAeadKeyFormat {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_message(1, &self.aes_ctr_key_format, buf)?;
        serialize_message(2, &self.hmac_key_format, buf)
    }
}

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct AesCtrHmacAeadKey {
    pub version: u32,
    pub aes_ctr_key: AesCtrKey,
    pub hmac_key: HmacKey,
}

impl Deserializer for AesCtrHmacAeadKey {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key = AesCtrHmacAeadKey::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key.version = deserialize_uint32(field, wire_type, b)?,
                2 => key.aes_ctr_key = deserialize_message(field, wire_type, b)?,
                3 => key.hmac_key = deserialize_message(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key)
    }
}

impl Serializer for AesCtrHmacAeadKey {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.version, buf)?;
        serialize_message(2, &self.aes_ctr_key, buf)?;
        serialize_message(3, &self.hmac_key, buf)
    }
}

pub(super) fn validate_aes_ctr_params(key_size: usize, params: &AesCtrParams) -> Result<()> {
    if key_size != 16 && key_size != 32 {
        return Err(Error::InvalidKeySize {
            name: "AES-CTR",
            size: key_size,
        });
    }
    if !(MIN_AES_CTR_IV_SIZE..=MAX_AES_CTR_IV_SIZE).contains(&params.iv_size) {
        return Err(Error::InvalidIvSize(params.iv_size));
    }
    Ok(())
}

pub(super) fn validate_hmac_params(key_size: usize, params: &HmacParams) -> Result<()> {
    if key_size < MIN_HMAC_KEY_SIZE {
        return Err(Error::InvalidKeySize {
            name: "HMAC",
            size: key_size,
        });
    }
    let digest_size = params
        .hash
        .digest_size()
        .ok_or(Error::UnsupportedHashType(params.hash))?;
    if params.tag_size < MIN_HMAC_TAG_SIZE || params.tag_size as usize > digest_size {
        return Err(Error::InvalidTagSize {
            hash: params.hash,
            size: params.tag_size,
        });
    }
    Ok(())
}

fn validate_aes_ctr_hmac_aead_key_format(key_format: &AesCtrHmacAeadKeyFormat) -> Result<()> {
    validate_aes_ctr_params(
        key_format.aes_ctr_key_format.key_size as usize,
        &key_format.aes_ctr_key_format.params,
    )?;
    validate_hmac_params(
        key_format.hmac_key_format.key_size as usize,
        &key_format.hmac_key_format.params,
    )
}

/// Key manager for AES-CTR-HMAC AEAD keys
pub struct AesCtrHmacAeadKeyManager {
    crypto_provider: Arc<dyn CryptoProvider>,
}

impl AesCtrHmacAeadKeyManager {
    pub fn new(crypto_provider: Arc<dyn CryptoProvider>) -> Self {
        Self { crypto_provider }
    }

    /// Generate a key conforming to the key format
    pub fn generate(&self, key_format: &AesCtrHmacAeadKeyFormat) -> Result<AesCtrHmacAeadKey> {
        validate_aes_ctr_hmac_aead_key_format(key_format)?;

        let rand = self.crypto_provider.rand();
        let mut aes_key_value =
            Zeroizing::new(vec![0u8; key_format.aes_ctr_key_format.key_size as usize]);
        rand.fill(&mut aes_key_value)?;
        let mut hmac_key_value =
            Zeroizing::new(vec![0u8; key_format.hmac_key_format.key_size as usize]);
        rand.fill(&mut hmac_key_value)?;
        debug!(
            "generated AES-CTR-HMAC key ({}-bit AES, HMAC-{})",
            key_format.aes_ctr_key_format.key_size * 8,
            key_format.hmac_key_format.params.hash
        );

        Ok(AesCtrHmacAeadKey {
            version: AES_CTR_HMAC_AEAD_KEY_VERSION,
            aes_ctr_key: AesCtrKey {
                version: AES_CTR_HMAC_AEAD_KEY_VERSION,
                params: key_format.aes_ctr_key_format.params.clone(),
                key_value: Bytes::copy_from_slice(&aes_key_value),
            },
            hmac_key: HmacKey {
                version: AES_CTR_HMAC_AEAD_KEY_VERSION,
                params: key_format.hmac_key_format.params.clone(),
                key_value: Bytes::copy_from_slice(&hmac_key_value),
            },
        })
    }
}

impl KeyFactory for AesCtrHmacAeadKeyManager {
    fn validate_key_format(&self, serialized_key_format: &[u8]) -> Result<()> {
        let key_format = AesCtrHmacAeadKeyFormat::deserialize_exact(serialized_key_format)?;
        validate_aes_ctr_hmac_aead_key_format(&key_format)
    }

    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Bytes> {
        let key_format = AesCtrHmacAeadKeyFormat::deserialize_exact(serialized_key_format)?;
        self.generate(&key_format)?.serialize_detached()
    }

    fn new_key_data(&self, serialized_key_format: &[u8]) -> Result<KeyData> {
        Ok(KeyData {
            type_url: AES_CTR_HMAC_AEAD_TYPE_URL.to_string(),
            value: self.new_key(serialized_key_format)?,
            key_material_type: KeyMaterialType::SYMMETRIC,
        })
    }
}

impl KeyManager for AesCtrHmacAeadKeyManager {
    fn key_type(&self) -> &str {
        AES_CTR_HMAC_AEAD_TYPE_URL
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::SYMMETRIC
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }

    fn validate_key(&self, serialized_key: &[u8]) -> Result<()> {
        let key = AesCtrHmacAeadKey::deserialize_exact(serialized_key)?;
        for version in [key.version, key.aes_ctr_key.version, key.hmac_key.version] {
            if version > AES_CTR_HMAC_AEAD_KEY_VERSION {
                return Err(Error::InvalidKeyVersion(version));
            }
        }
        validate_aes_ctr_params(key.aes_ctr_key.key_value.len(), &key.aes_ctr_key.params)?;
        validate_hmac_params(key.hmac_key.key_value.len(), &key.hmac_key.params)
    }
}

impl AeadKeyManager for AesCtrHmacAeadKeyManager {
    fn symmetric_key_size(&self, serialized_key_format: &[u8]) -> Result<usize> {
        let key_format = AesCtrHmacAeadKeyFormat::deserialize_exact(serialized_key_format)?;
        validate_aes_ctr_hmac_aead_key_format(&key_format)?;
        Ok(key_format.aes_ctr_key_format.key_size as usize
            + key_format.hmac_key_format.key_size as usize)
    }
}
