//! Binary serialization for models using postcard.

use super::json::ModelError;
use super::types::Model;

impl Model {
    /// Deserialize a model from binary format.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(postcard::from_bytes(bytes)?)
    }

    /// Serialize a model to binary format.
    pub fn to_binary(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("serialization should not fail")
    }
}
