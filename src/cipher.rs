//! Symmetric cipher protecting envelope payloads.
//!
//! The key is derived once from the merchant credential pair with HKDF-SHA256
//! (the public access id as salt, the secret access key as input keying material)
//! and used for AES-256-GCM. Both the merchant and the gateway derive the same key
//! from the same pair.
//!
//! An encoded payload is self-contained:
//!
//! ```text
//! base64( nonce[12] || ciphertext || tag[16] )
//! ```
//!
//! Decoding either yields the exact plaintext or a [`CipherError`]. Wrong keys,
//! truncation and any modified byte are all rejected by the GCM tag check.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as b64;
use hkdf::Hkdf;
use sha2::Sha256;
use std::fmt::{Debug, Formatter};

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const KEY_INFO: &[u8] = b"xmpay-envelope";

#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("key derivation failed")]
    KeyDerivation,
    #[error("encryption failed")]
    Encryption,
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is {0} bytes, shorter than nonce and tag")]
    Truncated(usize),
    #[error("payload failed authentication")]
    Authentication,
}

/// AES-256-GCM codec bound to one merchant credential pair.
///
/// Stateless between calls and safe to share across concurrent requests.
#[derive(Clone)]
pub struct CipherCodec {
    cipher: Aes256Gcm,
}

impl CipherCodec {
    /// Derives the envelope key from the access id and access key.
    pub fn new(access_id: &[u8], access_key: &[u8]) -> Result<Self, CipherError> {
        let hk = Hkdf::<Sha256>::new(Some(access_id), access_key);
        let mut key = [0u8; 32];
        hk.expand(KEY_INFO, &mut key)
            .map_err(|_| CipherError::KeyDerivation)?;
        Ok(Self {
            cipher: Aes256Gcm::new(&key.into()),
        })
    }

    /// Encrypts `plaintext` under a fresh random nonce.
    pub fn encode(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| CipherError::Encryption)?;
        let mut framed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        framed.extend_from_slice(&nonce);
        framed.extend_from_slice(&ciphertext);
        Ok(b64.encode(framed))
    }

    /// Decrypts a payload produced by [`Self::encode`] under the same credentials.
    pub fn decode<T: AsRef<[u8]>>(&self, payload: T) -> Result<Vec<u8>, CipherError> {
        let framed = b64.decode(payload)?;
        if framed.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Truncated(framed.len()));
        }
        let (nonce, ciphertext) = framed.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::Authentication)
    }
}

impl Debug for CipherCodec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherCodec").finish_non_exhaustive()
    }
}
