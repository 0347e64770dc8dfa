use bytes::Bytes;
use std::sync::Arc;
use std::thread;

use super::*;
use crate::key_template::{KeyTemplate, OutputPrefixType};
use crate::utilities::error::ErrorKind;

const FIXED_TYPE_URL: &str = "type.example.com/recies.FixedKey";

// Echoes the key format back as the key.
struct FixedKeyManager {
    type_url: &'static str,
}

impl KeyFactory for FixedKeyManager {
    fn validate_key_format(&self, serialized_key_format: &[u8]) -> Result<()> {
        if serialized_key_format.is_empty() {
            return Err(Error::InvalidKeySize {
                name: "fixed",
                size: 0,
            });
        }
        Ok(())
    }

    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Bytes> {
        self.validate_key_format(serialized_key_format)?;
        Ok(Bytes::copy_from_slice(serialized_key_format))
    }

    fn new_key_data(&self, serialized_key_format: &[u8]) -> Result<KeyData> {
        Ok(KeyData {
            type_url: self.type_url.to_string(),
            value: self.new_key(serialized_key_format)?,
            key_material_type: KeyMaterialType::SYMMETRIC,
        })
    }
}

impl KeyManager for FixedKeyManager {
    fn key_type(&self) -> &str {
        self.type_url
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::SYMMETRIC
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self
    }

    fn validate_key(&self, serialized_key: &[u8]) -> Result<()> {
        self.validate_key_format(serialized_key)
    }
}

fn fixed_template(value: &'static [u8]) -> KeyTemplate {
    KeyTemplate {
        type_url: FIXED_TYPE_URL.to_string(),
        value: Bytes::from_static(value),
        output_prefix_type: OutputPrefixType::TINK,
    }
}

#[test]
fn test_registry_dispatch() -> Result<()> {
    let registry: Registry = Registry::new();
    assert!(!registry.contains(FIXED_TYPE_URL)?);

    registry.register_key_manager(Arc::new(FixedKeyManager {
        type_url: FIXED_TYPE_URL,
    }))?;
    assert!(registry.contains(FIXED_TYPE_URL)?);

    let key_manager = registry.key_manager(FIXED_TYPE_URL)?;
    assert_eq!(key_manager.key_type(), FIXED_TYPE_URL);
    assert!(key_manager.does_support(FIXED_TYPE_URL));

    let template = fixed_template(b"format");
    assert_eq!(registry.new_key(&template)?, Bytes::from_static(b"format"));

    let key_data = registry.new_key_data(&template)?;
    assert_eq!(key_data.type_url, FIXED_TYPE_URL);
    assert_eq!(key_data.value, Bytes::from_static(b"format"));

    let err = registry.new_key(&fixed_template(b"")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameters);

    Ok(())
}

#[test]
fn test_registry_unknown_key_type() {
    let registry: Registry = Registry::new();

    let err = registry.key_manager(FIXED_TYPE_URL).err();
    assert!(matches!(err, Some(Error::UnknownKeyType(ref type_url)) if type_url == FIXED_TYPE_URL));

    let err = registry.new_key(&fixed_template(b"format")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownKeyType);
}

#[test]
fn test_registry_rejects_duplicate_registration() -> Result<()> {
    let registry: Registry = Registry::new();
    registry.register_key_manager(Arc::new(FixedKeyManager {
        type_url: FIXED_TYPE_URL,
    }))?;

    let err = registry
        .register_key_manager(Arc::new(FixedKeyManager {
            type_url: FIXED_TYPE_URL,
        }))
        .unwrap_err();
    assert!(matches!(err, Error::KeyManagerAlreadyRegistered(_)));

    Ok(())
}

#[test]
fn test_registry_type_urls_sorted() -> Result<()> {
    let registry: Registry = Registry::new();
    for type_url in ["type.example.com/b", "type.example.com/c", "type.example.com/a"] {
        registry.register_key_manager(Arc::new(FixedKeyManager { type_url }))?;
    }

    assert_eq!(
        registry.type_urls()?,
        vec![
            "type.example.com/a".to_string(),
            "type.example.com/b".to_string(),
            "type.example.com/c".to_string(),
        ]
    );
    assert!(format!("{registry:?}").contains("type.example.com/a"));

    Ok(())
}

#[test]
fn test_registry_shared_across_threads() -> Result<()> {
    let registry: Arc<Registry> = Arc::new(Registry::new());
    registry.register_key_manager(Arc::new(FixedKeyManager {
        type_url: FIXED_TYPE_URL,
    }))?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.new_key(&fixed_template(b"format")))
        })
        .collect();

    for handle in handles {
        match handle.join() {
            Ok(key) => assert_eq!(key?, Bytes::from_static(b"format")),
            Err(_) => panic!("worker thread panicked"),
        }
    }

    Ok(())
}

#[test]
fn test_registry_reports_poisoned_lock() {
    let registry: Arc<Registry> = Arc::new(Registry::new());
    let writer = Arc::clone(&registry);
    let joined = thread::spawn(move || {
        let _key_managers = writer.key_managers.write();
        panic!("writer panicked while holding the registry lock");
    })
    .join();
    assert!(joined.is_err());

    for err in [
        registry.contains(FIXED_TYPE_URL).err(),
        registry.type_urls().err(),
        registry.key_manager(FIXED_TYPE_URL).err(),
        registry
            .register_key_manager(Arc::new(FixedKeyManager {
                type_url: FIXED_TYPE_URL,
            }))
            .err(),
    ] {
        assert!(matches!(err, Some(Error::Other(_))));
    }
    assert!(format!("{registry:?}").contains("<poisoned>"));
}
