//! Column-level encryption for PII fields.
//!
//! New values are sealed with AES-256-GCM under a random 96-bit nonce and
//! stored as `v1:` + base64(nonce || ciphertext). Rows written before the
//! prefix existed used AES-256 in ECB mode with PKCS#7 padding and plain
//! base64; those are still readable with the same key.
//!
//! Decryption never fails: anything that cannot be decoded comes back as
//! the raw stored string.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::cipher::{generic_array::GenericArray, BlockDecrypt};
use aes_gcm::aes::Aes256;
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use thiserror::Error;

/// Marker for values written by the current scheme.
pub const CIPHER_PREFIX: &str = "v1:";

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const BLOCK_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),
    #[error("encryption failed: {0}")]
    Encrypt(String),
}

/// Symmetric converter applied to sensitive string columns.
#[derive(Clone)]
pub struct FieldCipher {
    key: [u8; KEY_LEN],
}

impl fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCipher").field("key", &"<redacted>").finish()
    }
}

impl FieldCipher {
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; KEY_LEN] = key
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?;
        Ok(Self { key })
    }

    /// Encrypt a plaintext value. Blank input is returned unchanged.
    pub fn encrypt(&self, plain: &str) -> Result<String, CryptoError> {
        if plain.trim().is_empty() {
            return Ok(plain.to_string());
        }
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce), plain.as_bytes())
            .map_err(|e| CryptoError::Encrypt(e.to_string()))?;

        let mut payload = Vec::with_capacity(NONCE_LEN + sealed.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&sealed);
        Ok(format!("{}{}", CIPHER_PREFIX, BASE64.encode(payload)))
    }

    /// Recover the plaintext of a stored value, or the stored value itself
    /// when it is blank or not a ciphertext this key can open.
    pub fn decrypt(&self, stored: &str) -> String {
        if stored.trim().is_empty() {
            return stored.to_string();
        }
        let opened = match stored.strip_prefix(CIPHER_PREFIX) {
            Some(payload) => self.open_current(payload),
            None => self.open_legacy(stored),
        };
        match opened {
            Some(plain) => plain,
            None => {
                tracing::debug!("field value is not decryptable; passing through");
                stored.to_string()
            }
        }
    }

    fn open_current(&self, payload: &str) -> Option<String> {
        let bytes = BASE64.decode(payload).ok()?;
        if bytes.len() <= NONCE_LEN {
            return None;
        }
        let (nonce, sealed) = bytes.split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let plain = cipher.decrypt(Nonce::from_slice(nonce), sealed).ok()?;
        String::from_utf8(plain).ok()
    }

    fn open_legacy(&self, stored: &str) -> Option<String> {
        let bytes = BASE64.decode(stored).ok()?;
        if bytes.is_empty() || bytes.len() % BLOCK_LEN != 0 {
            return None;
        }
        let cipher = Aes256::new_from_slice(&self.key).ok()?;
        let mut plain = Vec::with_capacity(bytes.len());
        for chunk in bytes.chunks(BLOCK_LEN) {
            let mut block = GenericArray::clone_from_slice(chunk);
            cipher.decrypt_block(&mut block);
            plain.extend_from_slice(&block);
        }
        let pad = *plain.last()? as usize;
        if pad == 0 || pad > BLOCK_LEN || plain[plain.len() - pad..].iter().any(|b| *b as usize != pad) {
            return None;
        }
        plain.truncate(plain.len() - pad);
        String::from_utf8(plain).ok()
    }
}
