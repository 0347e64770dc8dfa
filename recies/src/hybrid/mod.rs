//! ECIES-AEAD-HKDF hybrid encryption keys.
//!
//! A hybrid key format names a KEM (curve, HKDF hash and salt), the encoding of the ephemeral
//! point, and a DEM given as a complete AEAD [`KeyTemplate`]. The DEM template stays serialized
//! here and is only interpreted by the AEAD key manager its type URL resolves to.


pub mod dem_helper;
pub mod private_key_manager;
pub mod public_key_manager;
pub mod templates;
pub(crate) mod validation;

pub use self::dem_helper::EciesAeadHkdfDemHelper;
pub use self::private_key_manager::{EciesAeadHkdfKeyFactory, EciesAeadHkdfPrivateKeyManager};
pub use self::public_key_manager::EciesAeadHkdfPublicKeyManager;

use bytes::{Buf, BufMut, Bytes};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::aead::{self, AeadKeyManager};
use crate::crypto::provider::CryptoProvider;
use crate::crypto::{EcPointFormat, EllipticCurveType, HashType};
use crate::key_manager::Registry;
use crate::key_template::KeyTemplate;
use crate::utilities::error::*;
use crate::utilities::serde::*;

pub const ECIES_AEAD_HKDF_PRIVATE_KEY_TYPE_URL: &str =
    "type.googleapis.com/google.crypto.tink.EciesAeadHkdfPrivateKey";
pub const ECIES_AEAD_HKDF_PUBLIC_KEY_TYPE_URL: &str =
    "type.googleapis.com/google.crypto.tink.EciesAeadHkdfPublicKey";

pub const ECIES_AEAD_HKDF_PRIVATE_KEY_VERSION: u32 = 0;
pub const ECIES_AEAD_HKDF_PUBLIC_KEY_VERSION: u32 = 0;

/// KEM parameters: the curve of the ephemeral key exchange and the HKDF that expands its shared
/// secret into DEM key material
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct EciesHkdfKemParams {
    pub curve_type: EllipticCurveType,
    pub hkdf_hash_type: HashType,
    pub hkdf_salt: Bytes,
}

impl Deserializer for EciesHkdfKemParams {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut params = EciesHkdfKemParams::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => params.curve_type = deserialize_uint32(field, wire_type, b)?.into(),
                2 => params.hkdf_hash_type = deserialize_uint32(field, wire_type, b)?.into(),
                11 => params.hkdf_salt = deserialize_opaque_vec(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(params)
    }
}

impl Serializer for EciesHkdfKemParams {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.curve_type.into(), buf)?;
        serialize_uint32(2, self.hkdf_hash_type.into(), buf)?;
        serialize_opaque_vec(11, &self.hkdf_salt, buf)
    }
}

/// DEM parameters: the AEAD template whose keys encrypt the payload
///
/// The template's own output prefix type is carried but has no meaning for the hybrid scheme.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct EciesAeadDemParams {
    pub aead_dem: KeyTemplate,
}

impl Deserializer for EciesAeadDemParams {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut params = EciesAeadDemParams::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                2 => params.aead_dem = deserialize_message(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(params)
    }
}

impl Serializer for EciesAeadDemParams {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_message(2, &self.aead_dem, buf)
    }
}

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct EciesAeadHkdfParams {
    pub kem_params: EciesHkdfKemParams,
    pub dem_params: EciesAeadDemParams,
    pub ec_point_format: EcPointFormat,
}

impl Deserializer for EciesAeadHkdfParams {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut params = EciesAeadHkdfParams::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => params.kem_params = deserialize_message(field, wire_type, b)?,
                2 => params.dem_params = deserialize_message(field, wire_type, b)?,
                3 => params.ec_point_format = deserialize_uint32(field, wire_type, b)?.into(),
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(params)
    }
}

impl Serializer for EciesAeadHkdfParams {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_message(1, &self.kem_params, buf)?;
        serialize_message(2, &self.dem_params, buf)?;
        serialize_uint32(3, self.ec_point_format.into(), buf)
    }
}

/// EciesAeadHkdfKeyFormat is the serialized payload of a hybrid [`KeyTemplate`]
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct EciesAeadHkdfKeyFormat {
    pub params: EciesAeadHkdfParams,
}

impl Deserializer for EciesAeadHkdfKeyFormat {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key_format = EciesAeadHkdfKeyFormat::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key_format.params = deserialize_message(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key_format)
    }
}

impl Serializer for EciesAeadHkdfKeyFormat {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_message(1, &self.params, buf)
    }
}

/// EciesAeadHkdfPublicKey is the recipient's public point plus the scheme parameters
///
/// `x` and `y` are big-endian affine coordinates padded to the curve's field size.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct EciesAeadHkdfPublicKey {
    pub version: u32,
    pub params: EciesAeadHkdfParams,
    pub x: Bytes,
    pub y: Bytes,
}

impl EciesAeadHkdfPublicKey {
    /// Encode the public point in the key's point format
    pub fn encoded_point(&self, crypto_provider: &dyn CryptoProvider) -> Result<Bytes> {
        crypto_provider
            .curve(self.params.kem_params.curve_type)?
            .encode_point(&self.x, &self.y, self.params.ec_point_format)
    }
}

impl Deserializer for EciesAeadHkdfPublicKey {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key = EciesAeadHkdfPublicKey::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key.version = deserialize_uint32(field, wire_type, b)?,
                2 => key.params = deserialize_message(field, wire_type, b)?,
                3 => key.x = deserialize_opaque_vec(field, wire_type, b)?,
                4 => key.y = deserialize_opaque_vec(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key)
    }
}

impl Serializer for EciesAeadHkdfPublicKey {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.version, buf)?;
        serialize_message(2, &self.params, buf)?;
        serialize_opaque_vec(3, &self.x, buf)?;
        serialize_opaque_vec(4, &self.y, buf)
    }
}

/// EciesAeadHkdfPrivateKey is a private scalar together with the public key it belongs to
#[derive(Default, Clone, Eq, PartialEq)]
pub struct EciesAeadHkdfPrivateKey {
    pub version: u32,
    pub public_key: EciesAeadHkdfPublicKey,
    /// big-endian scalar padded to the curve's field size
    pub key_value: Bytes,
}

impl Debug for EciesAeadHkdfPrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EciesAeadHkdfPrivateKey")
            .field("version", &self.version)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl EciesAeadHkdfPrivateKey {
    /// Returns the public key of this private key
    pub fn public_key(&self) -> &EciesAeadHkdfPublicKey {
        &self.public_key
    }

    /// Returns the scheme parameters shared by the private and public key
    pub fn params(&self) -> &EciesAeadHkdfParams {
        &self.public_key.params
    }
}

impl Deserializer for EciesAeadHkdfPrivateKey {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key = EciesAeadHkdfPrivateKey::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key.version = deserialize_uint32(field, wire_type, b)?,
                2 => key.public_key = deserialize_message(field, wire_type, b)?,
                3 => key.key_value = deserialize_opaque_vec(field, wire_type, b)?,
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key)
    }
}

impl Serializer for EciesAeadHkdfPrivateKey {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_uint32(1, self.version, buf)?;
        serialize_message(2, &self.public_key, buf)?;
        serialize_opaque_vec(3, &self.key_value, buf)
    }
}

/// Register the ECIES-AEAD-HKDF private and public key managers with `registry`
///
/// Both managers resolve DEM templates through one shared registry of this crate's AEAD key
/// managers.
pub fn register_key_managers(
    registry: &Registry,
    crypto_provider: Arc<dyn CryptoProvider>,
) -> Result<()> {
    let dem_registry: Arc<Registry<dyn AeadKeyManager>> =
        Arc::new(aead::registry(crypto_provider.clone())?);
    registry.register_key_manager(Arc::new(EciesAeadHkdfPrivateKeyManager::with_dem_registry(
        crypto_provider.clone(),
        dem_registry.clone(),
    )))?;
    registry.register_key_manager(Arc::new(EciesAeadHkdfPublicKeyManager::with_dem_registry(
        crypto_provider,
        dem_registry,
    )))
}
