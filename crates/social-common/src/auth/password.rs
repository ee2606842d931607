//! Password hashing and verification
//!
//! Argon2id with a random salt per hash. [`PasswordService`] is the
//! [`CredentialHasher`] handed to the service layer.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use social_core::{CredentialHasher, DomainError, RepoResult};

use crate::error::AppError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Upper bound keeps hashing cost predictable
pub const MAX_PASSWORD_LEN: usize = 128;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Argon2-backed credential hasher
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Verify a password and return an error if invalid
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if verify_password(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

impl CredentialHasher for PasswordService {
    fn hash(&self, plaintext: &str) -> RepoResult<String> {
        hash_password(plaintext).map_err(|e| DomainError::InternalError(e.to_string()))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> RepoResult<bool> {
        verify_password(plaintext, digest).map_err(|e| DomainError::InternalError(e.to_string()))
    }
}

/// Validate password length
///
/// # Errors
/// Returns a validation error when the password is shorter than
/// [`MIN_PASSWORD_LEN`], longer than [`MAX_PASSWORD_LEN`], or only whitespace
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();

    if len < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    if len > MAX_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at most {MAX_PASSWORD_LEN} characters long"
        )));
    }

    if password.trim().is_empty() {
        return Err(AppError::Validation(
            "Password must not be only whitespace".to_string(),
        ));
    }

    Ok(())
}
