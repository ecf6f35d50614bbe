use std::fmt;

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use thiserror::Error;

use crate::keys::{derive_iv, derive_key, generate_iv, IV_LEN, KEY_LEN};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Plaintext substituted for a payload that cannot be decrypted: no overrides
pub const EMPTY_PAYLOAD: &str = "{}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("Invalid base64 payload: {0}")]
    Base64(String),
    #[error("Decryption failed (bad padding or wrong key)")]
    Padding,
    #[error("Payload too short")]
    PayloadTooShort,
    #[error("Decrypted payload is not valid UTF-8")]
    Utf8,
}

/// How the CBC initialization vector is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IvMode {
    /// IV taken from the passphrase hash and reused for every payload.
    /// This is the established on-disk format.
    #[default]
    Derived,
    /// Fresh random IV per payload, stored in front of the ciphertext
    Random,
}

/// Encrypt bytes with AES-256-CBC and PKCS#7 padding
pub fn encrypt_cbc(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt AES-256-CBC bytes and strip PKCS#7 padding
pub fn decrypt_cbc(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    if ciphertext.is_empty() {
        return Err(CipherError::PayloadTooShort);
    }

    Aes256CbcDec::new(key.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::Padding)
}

/// Passphrase-keyed text cipher for the settings payload.
///
/// Output is base64 text. An empty passphrase disables encryption entirely
/// and the payload passes through unchanged in both directions.
#[derive(Clone)]
pub struct SettingsCipher {
    passphrase: String,
    iv_mode: IvMode,
}

impl SettingsCipher {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
            iv_mode: IvMode::default(),
        }
    }

    pub fn with_iv_mode(mut self, iv_mode: IvMode) -> Self {
        self.iv_mode = iv_mode;
        self
    }

    /// Cipher that stores payloads as plain text
    pub fn plaintext() -> Self {
        Self::new(String::new())
    }

    pub fn iv_mode(&self) -> IvMode {
        self.iv_mode
    }

    pub fn is_passthrough(&self) -> bool {
        self.passphrase.is_empty()
    }

    /// Encrypt text and return the base64 payload
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        if self.is_passthrough() {
            return Ok(plaintext.to_string());
        }

        let key = derive_key(&self.passphrase);
        let sealed = match self.iv_mode {
            IvMode::Derived => encrypt_cbc(&key, &derive_iv(&self.passphrase), plaintext.as_bytes()),
            IvMode::Random => {
                let iv = generate_iv();
                let ciphertext = encrypt_cbc(&key, &iv, plaintext.as_bytes());
                let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
                out.extend_from_slice(&iv);
                out.extend_from_slice(&ciphertext);
                out
            }
        };

        Ok(STANDARD.encode(sealed))
    }

    /// Decrypt a base64 payload back to text
    pub fn decrypt(&self, payload: &str) -> Result<String, CipherError> {
        if self.is_passthrough() {
            return Ok(payload.to_string());
        }

        let raw = STANDARD
            .decode(payload.trim())
            .map_err(|e| CipherError::Base64(e.to_string()))?;
        let key = derive_key(&self.passphrase);

        let plaintext = match self.iv_mode {
            IvMode::Derived => decrypt_cbc(&key, &derive_iv(&self.passphrase), &raw)?,
            IvMode::Random => {
                if raw.len() <= IV_LEN {
                    return Err(CipherError::PayloadTooShort);
                }
                let (iv_bytes, ciphertext) = raw.split_at(IV_LEN);
                let mut iv = [0u8; IV_LEN];
                iv.copy_from_slice(iv_bytes);
                decrypt_cbc(&key, &iv, ciphertext)?
            }
        };

        String::from_utf8(plaintext).map_err(|_| CipherError::Utf8)
    }
}

impl fmt::Debug for SettingsCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsCipher")
            .field("passphrase", &if self.is_passthrough() { "<none>" } else { "<redacted>" })
            .field("iv_mode", &self.iv_mode)
            .finish()
    }
}
