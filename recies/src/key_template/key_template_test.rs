use super::*;

const AES_GCM_TYPE_URL: &str = "type.googleapis.com/google.crypto.tink.AesGcmKey";

fn aes128_gcm_wire() -> Vec<u8> {
    let mut raw = vec![0x0A, AES_GCM_TYPE_URL.len() as u8];
    raw.extend_from_slice(AES_GCM_TYPE_URL.as_bytes());
    raw.extend_from_slice(&[0x12, 0x02, 0x10, 0x10, 0x18, 0x01]);
    raw
}

#[test]
fn test_key_template_wire_format() -> Result<()> {
    let key_template = KeyTemplate {
        type_url: AES_GCM_TYPE_URL.to_string(),
        value: Bytes::from_static(&[0x10, 0x10]),
        output_prefix_type: OutputPrefixType::TINK,
    };

    let raw = key_template.serialize_detached()?;
    assert_eq!(raw.as_ref(), aes128_gcm_wire().as_slice());

    let decoded = KeyTemplate::deserialize_exact(&raw)?;
    assert_eq!(decoded, key_template);

    Ok(())
}

#[test]
fn test_key_template_field_order_is_irrelevant_on_input() -> Result<()> {
    let mut raw = vec![0x18, 0x03, 0x12, 0x01, 0xAA, 0x0A, 0x01, b'x'];
    let key_template = KeyTemplate::deserialize(&mut raw.as_slice())?;
    assert_eq!(key_template.type_url, "x");
    assert_eq!(key_template.value.as_ref(), &[0xAA]);
    assert_eq!(key_template.output_prefix_type, OutputPrefixType::RAW);

    // a repeated field keeps the last value
    raw.extend_from_slice(&[0x18, 0x01]);
    let key_template = KeyTemplate::deserialize_exact(&raw)?;
    assert_eq!(key_template.output_prefix_type, OutputPrefixType::TINK);

    Ok(())
}

#[test]
fn test_key_template_rejects_malformed_input() {
    let raw = aes128_gcm_wire();

    for n in [1, 2, 10, raw.len() - 5, raw.len() - 1] {
        let err = KeyTemplate::deserialize_exact(&raw[..n]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization, "truncated to {n} bytes");
    }

    let mut unknown_field = raw.clone();
    unknown_field.extend_from_slice(&[0x20, 0x01]);
    assert!(matches!(
        KeyTemplate::deserialize_exact(&unknown_field),
        Err(Error::UnknownField(4))
    ));

    // type_url sent as a varint
    assert!(matches!(
        KeyTemplate::deserialize_exact(&[0x08, 0x01]),
        Err(Error::InvalidWireType {
            field: 1,
            wire_type: 0
        })
    ));
}

#[test]
fn test_unknown_output_prefix_type_is_preserved() -> Result<()> {
    let key_template = KeyTemplate::deserialize_exact(&[0x18, 0x09])?;
    assert_eq!(key_template.output_prefix_type, OutputPrefixType::Unknown(9));
    assert_eq!(key_template.serialize_detached()?.as_ref(), &[0x18, 0x09]);
    Ok(())
}

#[test]
fn test_output_prefix_type_codes() {
    let tests = [
        (0u32, OutputPrefixType::UNKNOWN_PREFIX),
        (1, OutputPrefixType::TINK),
        (2, OutputPrefixType::LEGACY),
        (3, OutputPrefixType::RAW),
        (4, OutputPrefixType::CRUNCHY),
    ];
    for (code, output_prefix_type) in tests {
        assert_eq!(OutputPrefixType::from(code), output_prefix_type);
        assert_eq!(u32::from(output_prefix_type), code);
    }
}

#[test]
fn test_key_data() -> Result<()> {
    let key_data = KeyData {
        type_url: AES_GCM_TYPE_URL.to_string(),
        value: Bytes::from_static(&[0x1A, 0x02, 0x01, 0x02]),
        key_material_type: KeyMaterialType::SYMMETRIC,
    };

    let decoded = KeyData::deserialize_exact(&key_data.serialize_detached()?)?;
    assert_eq!(decoded, key_data);

    let debug = format!("{key_data:?}");
    assert!(debug.contains("[4 bytes]"));
    assert!(debug.contains("SYMMETRIC"));

    Ok(())
}
