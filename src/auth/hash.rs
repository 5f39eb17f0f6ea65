//! SHA-256 credential hashing.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of `input`.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// The `appkey` field: digest of `"{user_id}|{api_key}"`.
pub(crate) fn app_key_hash(user_id: &str, api_key: &str) -> String {
    sha256_hex(&format!("{}|{}", user_id, api_key))
}
