use bcrypt::{DEFAULT_COST, hash, verify};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to hash passcode: {0}")]
pub struct HashError(pub String);

/// Passcode hashing seam. Comparison never uses cleartext equality; the
/// underlying primitive compares against the stored hash.
pub trait PasswordEncryptor: Send + Sync {
    fn hash_passcode(&self, passcode: &str) -> Result<String, HashError>;
    fn compare_passcode(&self, passcode: &str, hashed: &str) -> bool;
}

pub struct BcryptEncryptor;

impl PasswordEncryptor for BcryptEncryptor {
    fn hash_passcode(&self, passcode: &str) -> Result<String, HashError> {
        hash(passcode, DEFAULT_COST).map_err(|e| HashError(e.to_string()))
    }

    fn compare_passcode(&self, passcode: &str, hashed: &str) -> bool {
        verify(passcode, hashed).unwrap_or(false)
    }
}
