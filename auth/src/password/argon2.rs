use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::HashingError;

/// One-way credential hasher.
///
/// Digests are PHC strings (Argon2id, default cost parameters, random salt),
/// so every digest carries the parameters needed to verify it later.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher using Argon2id with default cost parameters
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// Hashing the same plaintext twice yields two different digests.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - The salt or the Argon2 computation failed
    pub fn hash(&self, password: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashingError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// The digest comparison is constant-time. A mismatch is `Ok(false)`,
    /// never an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to check
    /// * `digest` - PHC string produced by [`PasswordHasher::hash`]
    ///
    /// # Returns
    /// true if the password matches the digest
    ///
    /// # Errors
    /// * `MalformedDigest` - `digest` is not a parseable PHC string
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, HashingError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| HashingError::MalformedDigest(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
