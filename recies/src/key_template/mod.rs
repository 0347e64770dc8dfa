//! Key templates and key data: the type-tagged envelopes that carry serialized key formats and
//! serialized keys between callers and key managers.

#[cfg(test)]
mod key_template_test;

use bytes::{Buf, BufMut, Bytes};
use std::fmt::{Display, Formatter};

use crate::utilities::error::*;
use crate::utilities::serde::*;

/// Policy deciding whether ciphertexts produced with a key carry a key-identifier prefix.
#[allow(non_camel_case_types)]
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum OutputPrefixType {
    #[default]
    UNKNOWN_PREFIX = 0,
    /// 5-byte prefix: version byte followed by the big-endian key id.
    TINK = 1,
    /// Legacy prefix, kept for compatibility with older ciphertexts.
    LEGACY = 2,
    /// No prefix.
    RAW = 3,
    /// Legacy prefix, kept for compatibility with older ciphertexts.
    CRUNCHY = 4,
    Unknown(u32),
}

impl From<u32> for OutputPrefixType {
    fn from(v: u32) -> Self {
        match v {
            0 => OutputPrefixType::UNKNOWN_PREFIX,
            1 => OutputPrefixType::TINK,
            2 => OutputPrefixType::LEGACY,
            3 => OutputPrefixType::RAW,
            4 => OutputPrefixType::CRUNCHY,
            _ => OutputPrefixType::Unknown(v),
        }
    }
}

impl From<OutputPrefixType> for u32 {
    fn from(val: OutputPrefixType) -> u32 {
        match val {
            OutputPrefixType::UNKNOWN_PREFIX => 0,
            OutputPrefixType::TINK => 1,
            OutputPrefixType::LEGACY => 2,
            OutputPrefixType::RAW => 3,
            OutputPrefixType::CRUNCHY => 4,
            OutputPrefixType::Unknown(v) => v,
        }
    }
}

impl Display for OutputPrefixType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// KeyTemplate is a recipe for generating a key: the key type, its serialized key format and
/// the output prefix policy. It never contains key material.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct KeyTemplate {
    pub type_url: String,
    pub value: Bytes,
    pub output_prefix_type: OutputPrefixType,
}

impl KeyTemplate {
    /// Build a template from a key format.
    ///
    /// # Panics
    ///
    /// Serialization only fails for a field longer than `u32::MAX` bytes, which panics here.
    pub(crate) fn from_key_format<T: Serializer>(
        type_url: &str,
        key_format: &T,
        output_prefix_type: OutputPrefixType,
    ) -> Self {
        let value = match key_format.serialize_detached() {
            Ok(value) => value,
            Err(err) => panic!("key format for {type_url} failed to serialize: {err}"),
        };
        KeyTemplate {
            type_url: type_url.to_string(),
            value,
            output_prefix_type,
        }
    }
}

impl Deserializer for KeyTemplate {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key_template = KeyTemplate::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key_template.type_url = deserialize_string(field, wire_type, b)?,
                2 => key_template.value = deserialize_opaque_vec(field, wire_type, b)?,
                3 => {
                    key_template.output_prefix_type =
                        deserialize_uint32(field, wire_type, b)?.into()
                }
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key_template)
    }
}

impl Serializer for KeyTemplate {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_string(1, &self.type_url, buf)?;
        serialize_opaque_vec(2, &self.value, buf)?;
        serialize_uint32(3, self.output_prefix_type.into(), buf)
    }
}

/// The kind of key material a [`KeyData`] carries.
#[allow(non_camel_case_types)]
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum KeyMaterialType {
    #[default]
    UNKNOWN_KEYMATERIAL = 0,
    SYMMETRIC = 1,
    ASYMMETRIC_PRIVATE = 2,
    ASYMMETRIC_PUBLIC = 3,
    REMOTE = 4,
    Unknown(u32),
}

impl From<u32> for KeyMaterialType {
    fn from(v: u32) -> Self {
        match v {
            0 => KeyMaterialType::UNKNOWN_KEYMATERIAL,
            1 => KeyMaterialType::SYMMETRIC,
            2 => KeyMaterialType::ASYMMETRIC_PRIVATE,
            3 => KeyMaterialType::ASYMMETRIC_PUBLIC,
            4 => KeyMaterialType::REMOTE,
            _ => KeyMaterialType::Unknown(v),
        }
    }
}

impl From<KeyMaterialType> for u32 {
    fn from(val: KeyMaterialType) -> u32 {
        match val {
            KeyMaterialType::UNKNOWN_KEYMATERIAL => 0,
            KeyMaterialType::SYMMETRIC => 1,
            KeyMaterialType::ASYMMETRIC_PRIVATE => 2,
            KeyMaterialType::ASYMMETRIC_PUBLIC => 3,
            KeyMaterialType::REMOTE => 4,
            KeyMaterialType::Unknown(v) => v,
        }
    }
}

/// KeyData is a serialized key tagged with its type URL.
#[derive(Default, Clone, Eq, PartialEq)]
pub struct KeyData {
    pub type_url: String,
    pub value: Bytes,
    pub key_material_type: KeyMaterialType,
}

// The value may hold secret key material, so it never reaches logs.
impl std::fmt::Debug for KeyData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyData")
            .field("type_url", &self.type_url)
            .field("value", &format_args!("[{} bytes]", self.value.len()))
            .field("key_material_type", &self.key_material_type)
            .finish()
    }
}

impl Deserializer for KeyData {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut key_data = KeyData::default();
        deserialize_fields(buf, |field, wire_type, b| {
            match field {
                1 => key_data.type_url = deserialize_string(field, wire_type, b)?,
                2 => key_data.value = deserialize_opaque_vec(field, wire_type, b)?,
                3 => key_data.key_material_type = deserialize_uint32(field, wire_type, b)?.into(),
                _ => return Err(Error::UnknownField(field)),
            }
            Ok(())
        })?;
        Ok(key_data)
    }
}

impl Serializer for KeyData {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut,
    {
        serialize_string(1, &self.type_url, buf)?;
        serialize_opaque_vec(2, &self.value, buf)?;
        serialize_uint32(3, self.key_material_type.into(), buf)
    }
}
