use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Hash([u8; 32]);

impl Hash {
    pub fn digest(input: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(input.as_ref());
        let result = hasher.finalize();
        let mut array = [0u8; 32];
        array.copy_from_slice(&result);
        Hash(array)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<Hash> for String {
    fn from(hash: Hash) -> String {
        hash.to_hex()
    }
}

impl TryFrom<String> for Hash {
    type Error = HashError;

    fn try_from(value: String) -> Result<Self, HashError> {
        let bytes = hex::decode(&value).map_err(|_| HashError::InvalidHex(value))?;
        if bytes.len() != 32 {
            return Err(HashError::InvalidLength(bytes.len() as u32));
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(&bytes);
        Ok(Hash(array))
    }
}

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Given string is not valid hexidecimal: {0}")]
    InvalidHex(String),
    #[error("Expected 32 bytes, got {0}")]
    InvalidLength(u32),
}
