use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// AES-256 key length
pub const KEY_LEN: usize = 32;

/// AES block / CBC IV length
pub const IV_LEN: usize = 16;

/// Hash data using SHA-256
pub fn hash(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive the 256-bit cipher key from a passphrase (SHA-256 of its UTF-8 bytes)
pub fn derive_key(passphrase: &str) -> [u8; KEY_LEN] {
    hash(passphrase.as_bytes())
}

/// Derive the IV from a passphrase: the first 16 bytes of the key hash.
///
/// The same IV is used for every payload sealed with this passphrase.
pub fn derive_iv(passphrase: &str) -> [u8; IV_LEN] {
    let key = derive_key(passphrase);
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&key[..IV_LEN]);
    iv
}

/// Generate a random IV
pub fn generate_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    iv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_is_sha256() {
        assert_eq!(
            hex::encode(derive_key("DefaultKey")),
            "d9f5333447f53ed955847ce41d8c8f6b2c655c1b7406f4043c26bd648b3e9eb1"
        );
    }

    #[test]
    fn test_derive_iv_is_key_prefix() {
        let key = derive_key("DefaultKey");
        let iv = derive_iv("DefaultKey");
        assert_eq!(&key[..IV_LEN], &iv[..]);
        assert_eq!(hex::encode(iv), "d9f5333447f53ed955847ce41d8c8f6b");
    }

    #[test]
    fn test_different_passphrases_differ() {
        assert_ne!(derive_key("DefaultKey"), derive_key("another passphrase"));
    }

    #[test]
    fn test_generate_iv_is_random() {
        assert_ne!(generate_iv(), generate_iv());
    }
}
