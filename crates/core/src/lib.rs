//! VaultSet Core Types
//!
//! This crate defines the settings value tree and the dotted-path addressing
//! scheme used throughout VaultSet.

mod error;
mod path;
mod value;

pub use error::*;
pub use path::*;
pub use value::*;
