use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way salted password hashing.
///
/// Hashes are Argon2id PHC strings, so algorithm, parameters and salt travel
/// with the digest and verification never needs anything but the stored value.
/// CPU and memory heavy: async callers should run it on a blocking thread.
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the Argon2id default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// Comparison is delegated to Argon2's verifier, which compares digests in
    /// constant time.
    ///
    /// # Returns
    /// `true` on match, `false` on mismatch
    ///
    /// # Errors
    /// * `MalformedHash` - Stored value is not a PHC string
    /// * `VerificationFailed` - Argon2 failed for a reason other than mismatch
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}
