//! Symmetric AEAD key managers and the AEAD template catalog.
//!
//! These managers only describe and generate AEAD key material. They are the DEM ingredient of
//! the hybrid scheme: a hybrid key format embeds one of the catalog templates, and the hybrid
//! key manager resolves its type URL through a `Registry<dyn AeadKeyManager>`.


pub mod aes_ctr_hmac;
pub mod aes_gcm;
pub mod templates;
pub mod xchacha20_poly1305;

pub use self::aes_ctr_hmac::*;
pub use self::aes_gcm::*;
pub use self::xchacha20_poly1305::*;

use std::sync::Arc;
use zeroize::Zeroizing;

use crate::crypto::provider::CryptoProvider;
use crate::key_manager::{KeyFactory, KeyManager, Registry};
use crate::key_template::{KeyData, KeyMaterialType};
use crate::utilities::error::*;
use crate::utilities::serde::*;

pub const AES_GCM_TYPE_URL: &str = "type.googleapis.com/google.crypto.tink.AesGcmKey";
pub const AES_CTR_HMAC_AEAD_TYPE_URL: &str =
    "type.googleapis.com/google.crypto.tink.AesCtrHmacAeadKey";
pub const XCHACHA20_POLY1305_TYPE_URL: &str =
    "type.googleapis.com/google.crypto.tink.XChaCha20Poly1305Key";

pub const AES_GCM_KEY_VERSION: u32 = 0;
pub const AES_CTR_HMAC_AEAD_KEY_VERSION: u32 = 0;
pub const XCHACHA20_POLY1305_KEY_VERSION: u32 = 0;

/// AeadKeyManager is a key manager whose keys can serve as the DEM of a hybrid scheme
pub trait AeadKeyManager: KeyManager {
    /// Size in bytes of the symmetric key material the DEM derives for this key format
    fn symmetric_key_size(&self, serialized_key_format: &[u8]) -> Result<usize>;
}

/// Build a registry holding every AEAD key manager of this crate
pub fn registry(crypto_provider: Arc<dyn CryptoProvider>) -> Result<Registry<dyn AeadKeyManager>> {
    let registry: Registry<dyn AeadKeyManager> = Registry::new();
    registry.register_key_manager(Arc::new(AesGcmKeyManager::new(crypto_provider.clone())))?;
    registry.register_key_manager(Arc::new(AesCtrHmacAeadKeyManager::new(
        crypto_provider.clone(),
    )))?;
    registry.register_key_manager(Arc::new(XChaCha20Poly1305KeyManager::new(crypto_provider)))?;
    Ok(registry)
}

/// Register every AEAD key manager of this crate with a general purpose registry
pub fn register_key_managers(
    registry: &Registry,
    crypto_provider: Arc<dyn CryptoProvider>,
) -> Result<()> {
    registry.register_key_manager(Arc::new(AesGcmKeyManager::new(crypto_provider.clone())))?;
    registry.register_key_manager(Arc::new(AesCtrHmacAeadKeyManager::new(
        crypto_provider.clone(),
    )))?;
    registry.register_key_manager(Arc::new(XChaCha20Poly1305KeyManager::new(crypto_provider)))
}
