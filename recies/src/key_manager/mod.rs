//! Key manager capability traits and the type URL registry that dispatches to them.
//!
//! A key manager is a stateless service identified by a fixed type URL. It validates serialized
//! keys of its type and owns a [`KeyFactory`] that turns serialized key formats into fresh keys.

#[cfg(test)]
mod registry_test;

pub mod registry;
pub use self::registry::Registry;

use bytes::Bytes;

use crate::key_template::{KeyData, KeyMaterialType};
use crate::utilities::error::*;

/// KeyFactory generates keys from serialized key formats
pub trait KeyFactory: Send + Sync {
    /// Validate a serialized key format without generating anything
    fn validate_key_format(&self, serialized_key_format: &[u8]) -> Result<()>;

    /// Generate a fresh key conforming to the serialized key format and return it serialized
    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Bytes>;

    /// Generate a fresh key and wrap it with its type URL and key material type
    fn new_key_data(&self, serialized_key_format: &[u8]) -> Result<KeyData>;
}

/// KeyManager is the capability a registry dispatches to by type URL
pub trait KeyManager: Send + Sync {
    /// The fixed type URL of keys handled by this manager
    fn key_type(&self) -> &str;

    /// The kind of key material this manager produces
    fn key_material_type(&self) -> KeyMaterialType;

    /// Returns the key generation sub-contract
    fn key_factory(&self) -> &dyn KeyFactory;

    /// Validate a serialized key of this manager's type
    fn validate_key(&self, serialized_key: &[u8]) -> Result<()>;

    /// Check whether this manager handles the type URL
    fn does_support(&self, type_url: &str) -> bool {
        type_url == self.key_type()
    }
}

/// PrivateKeyManager manages asymmetric private keys and can project them to public key data
pub trait PrivateKeyManager: KeyManager {
    /// Extract the public key of a serialized private key
    fn public_key_data(&self, serialized_private_key: &[u8]) -> Result<KeyData>;
}
