//! Protocol buffers wire codec.
//!
//! Key formats, keys and templates are exchanged as protocol buffers so they
//! stay byte compatible with other implementations of the same key types.
//! Only the two wire types those messages use are understood: VARINT for
//! integers and enums, LEN for bytes, strings and nested messages.
//!
//! Output is deterministic: fields are written in field-number order and
//! proto3 default scalars are omitted.


use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::utilities::error::{Error, Result};

const MAX_VARINT_LEN: usize = 10;
const MAX_FIELD_NUMBER: u64 = (1 << 29) - 1;

/// Protobuf wire type of a field.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    I64 = 1,
    Len = 2,
    StartGroup = 3,
    EndGroup = 4,
    I32 = 5,
    Unknown(u8),
}

impl From<u8> for WireType {
    fn from(v: u8) -> Self {
        match v {
            0 => WireType::Varint,
            1 => WireType::I64,
            2 => WireType::Len,
            3 => WireType::StartGroup,
            4 => WireType::EndGroup,
            5 => WireType::I32,
            _ => WireType::Unknown(v),
        }
    }
}

impl From<WireType> for u8 {
    fn from(val: WireType) -> u8 {
        match val {
            WireType::Varint => 0,
            WireType::I64 => 1,
            WireType::Len => 2,
            WireType::StartGroup => 3,
            WireType::EndGroup => 4,
            WireType::I32 => 5,
            WireType::Unknown(v) => v,
        }
    }
}

pub(crate) fn deserialize_varint<B: Buf>(buf: &mut B) -> Result<u64> {
    let mut v = 0u64;
    for i in 0..MAX_VARINT_LEN {
        if !buf.has_remaining() {
            return Err(Error::BufferTooSmall);
        }
        let b = buf.get_u8();
        // the tenth byte may only carry the single remaining bit
        if i == MAX_VARINT_LEN - 1 && b > 1 {
            return Err(Error::VarintExceeds64Bits);
        }
        v |= ((b & 0x7F) as u64) << (7 * i);
        if b & 0x80 == 0 {
            return Ok(v);
        }
    }
    Err(Error::VarintExceeds64Bits)
}

pub(crate) fn serialize_varint<B: BufMut>(mut n: u64, buf: &mut B) -> Result<()> {
    while n >= 0x80 {
        buf.put_u8((n as u8) | 0x80);
        n >>= 7;
    }
    buf.put_u8(n as u8);
    Ok(())
}

pub(crate) fn deserialize_field_key<B: Buf>(buf: &mut B) -> Result<(u32, WireType)> {
    let key = deserialize_varint(buf)?;
    let field = key >> 3;
    if field == 0 || field > MAX_FIELD_NUMBER {
        return Err(Error::InvalidFieldNumber(field));
    }
    Ok((field as u32, ((key & 0x07) as u8).into()))
}

pub(crate) fn serialize_field_key<B: BufMut>(
    field: u32,
    wire_type: WireType,
    buf: &mut B,
) -> Result<()> {
    let wire_type: u8 = wire_type.into();
    serialize_varint(((field as u64) << 3) | wire_type as u64, buf)
}

fn expect_wire_type(field: u32, actual: WireType, expected: WireType) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidWireType {
            field,
            wire_type: actual.into(),
        });
    }
    Ok(())
}

pub(crate) fn deserialize_uint32<B: Buf>(
    field: u32,
    wire_type: WireType,
    buf: &mut B,
) -> Result<u32> {
    expect_wire_type(field, wire_type, WireType::Varint)?;
    let v = deserialize_varint(buf)?;
    u32::try_from(v).map_err(|_| Error::VarintExceeds32Bits(v))
}

pub(crate) fn serialize_uint32<B: BufMut>(field: u32, v: u32, buf: &mut B) -> Result<()> {
    if v == 0 {
        return Ok(());
    }
    serialize_field_key(field, WireType::Varint, buf)?;
    serialize_varint(v as u64, buf)
}

pub(crate) fn deserialize_opaque_vec<B: Buf>(
    field: u32,
    wire_type: WireType,
    buf: &mut B,
) -> Result<Bytes> {
    expect_wire_type(field, wire_type, WireType::Len)?;
    let n = deserialize_varint(buf)?;
    let n = usize::try_from(n).map_err(|_| Error::BufferTooSmall)?;
    if buf.remaining() < n {
        return Err(Error::BufferTooSmall);
    }

    Ok(buf.copy_to_bytes(n))
}

fn serialize_length_delimited<B: BufMut>(field: u32, v: &[u8], buf: &mut B) -> Result<()> {
    if v.len() > u32::MAX as usize {
        return Err(Error::LengthExceedsMaximumValueOfU32(v.len()));
    }

    serialize_field_key(field, WireType::Len, buf)?;
    serialize_varint(v.len() as u64, buf)?;

    buf.put(v);

    Ok(())
}

pub(crate) fn serialize_opaque_vec<B: BufMut>(field: u32, v: &[u8], buf: &mut B) -> Result<()> {
    if v.is_empty() {
        return Ok(());
    }
    serialize_length_delimited(field, v, buf)
}

pub(crate) fn deserialize_string<B: Buf>(
    field: u32,
    wire_type: WireType,
    buf: &mut B,
) -> Result<String> {
    let raw = deserialize_opaque_vec(field, wire_type, buf)?;
    Ok(String::from_utf8(raw.to_vec())?)
}

pub(crate) fn serialize_string<B: BufMut>(field: u32, v: &str, buf: &mut B) -> Result<()> {
    serialize_opaque_vec(field, v.as_bytes(), buf)
}

pub(crate) fn deserialize_message<T: Deserializer, B: Buf>(
    field: u32,
    wire_type: WireType,
    buf: &mut B,
) -> Result<T> {
    let mut raw = deserialize_opaque_vec(field, wire_type, buf)?;
    T::deserialize(&mut raw)
}

pub(crate) fn serialize_message<T: Serializer, B: BufMut>(
    field: u32,
    v: &T,
    buf: &mut B,
) -> Result<()> {
    // The message is prefixed with its length, so it has to be encoded into
    // a temporary buffer first
    let mut child = BytesMut::new();
    v.serialize(&mut child)?;

    serialize_length_delimited(field, &child, buf)
}

/// Walks every field of a message until `buf` is exhausted.
///
/// `f` must consume the field value. Fields it does not recognize should be
/// reported with [`Error::UnknownField`].
pub(crate) fn deserialize_fields<B: Buf>(
    buf: &mut B,
    mut f: impl FnMut(u32, WireType, &mut B) -> Result<()>,
) -> Result<()> {
    while buf.has_remaining() {
        let (field, wire_type) = deserialize_field_key(buf)?;
        f(field, wire_type, buf)?;
    }
    Ok(())
}

pub trait Deserializer {
    fn deserialize<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf;

    /// Deserializes a complete message from `raw`.
    fn deserialize_exact(raw: &[u8]) -> Result<Self>
    where
        Self: Sized,
    {
        let mut buf = raw;
        let v = Self::deserialize(&mut buf)?;
        if buf.has_remaining() {
            return Err(Error::InputContainsExcessBytes(buf.remaining()));
        }
        Ok(v)
    }
}

pub trait Serializer {
    fn serialize<B>(&self, buf: &mut B) -> Result<()>
    where
        Self: Sized,
        B: BufMut;

    fn serialize_detached(&self) -> Result<Bytes>
    where
        Self: Sized,
    {
        let mut buf = BytesMut::new();
        self.serialize(&mut buf)?;
        Ok(buf.freeze())
    }
}
