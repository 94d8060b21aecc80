//! Payload serialization
//!
//! Turns application values into bytes for storage commands and back.
//! Kept behind [`PayloadSerializer`] so the codec can be swapped without
//! touching the protocol code.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Codec for command payloads
pub trait PayloadSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// Compact binary payloads via bincode
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeSerializer;

impl PayloadSerializer for BincodeSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(bincode::deserialize(bytes)?)
    }
}
