//! VaultSet Cryptography
//!
//! Passphrase-keyed symmetric encryption for the persisted settings payload.

mod keys;
mod encrypt;

pub use keys::*;
pub use encrypt::*;
