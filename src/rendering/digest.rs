//! Content digests of rendered frames

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of an RGBA buffer. Two renders match exactly when
/// their digests are equal.
pub fn frame_digest(rgba: &[u8]) -> String {
    hex::encode(Sha256::digest(rgba))
}
