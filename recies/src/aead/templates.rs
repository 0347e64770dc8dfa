//! Named AEAD key templates.
//!
//! Every template is a pure function of its name: calling one twice yields byte-identical
//! values.

use super::*;
use crate::crypto::HashType;
use crate::key_template::{KeyTemplate, OutputPrefixType};

/// AES-128-GCM with a 16 byte key
pub fn aes128_gcm() -> KeyTemplate {
    aes_gcm(16, OutputPrefixType::TINK)
}

/// AES-256-GCM with a 32 byte key
pub fn aes256_gcm() -> KeyTemplate {
    aes_gcm(32, OutputPrefixType::TINK)
}

/// AES-256-GCM with a 32 byte key and no ciphertext prefix
pub fn aes256_gcm_no_prefix() -> KeyTemplate {
    aes_gcm(32, OutputPrefixType::RAW)
}

/// AES-128-CTR with a 16 byte IV and HMAC-SHA256 with a 32 byte key and a 16 byte tag
pub fn aes128_ctr_hmac_sha256() -> KeyTemplate {
    aes_ctr_hmac(16, 16, HashType::SHA256, 32, 16)
}

/// AES-256-CTR with a 16 byte IV and HMAC-SHA256 with a 32 byte key and a 32 byte tag
pub fn aes256_ctr_hmac_sha256() -> KeyTemplate {
    aes_ctr_hmac(32, 16, HashType::SHA256, 32, 32)
}

pub fn xchacha20_poly1305() -> KeyTemplate {
    KeyTemplate::from_key_format(
        XCHACHA20_POLY1305_TYPE_URL,
        &XChaCha20Poly1305KeyFormat::default(),
        OutputPrefixType::TINK,
    )
}

fn aes_gcm(key_size: u32, output_prefix_type: OutputPrefixType) -> KeyTemplate {
    let key_format = AesGcmKeyFormat {
        key_size,
        version: AES_GCM_KEY_VERSION,
    };
    KeyTemplate::from_key_format(AES_GCM_TYPE_URL, &key_format, output_prefix_type)
}

fn aes_ctr_hmac(
    aes_key_size: u32,
    iv_size: u32,
    hash: HashType,
    hmac_key_size: u32,
    tag_size: u32,
) -> KeyTemplate {
    let key_format = AesCtrHmacAeadKeyFormat {
        aes_ctr_key_format: AesCtrKeyFormat {
            params: AesCtrParams { iv_size },
            key_size: aes_key_size,
        },
        hmac_key_format: HmacKeyFormat {
            params: HmacParams { hash, tag_size },
            key_size: hmac_key_size,
            version: AES_CTR_HMAC_AEAD_KEY_VERSION,
        },
    };
    KeyTemplate::from_key_format(
        AES_CTR_HMAC_AEAD_TYPE_URL,
        &key_format,
        OutputPrefixType::TINK,
    )
}
