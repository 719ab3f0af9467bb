//! Salted password hashing for tutorlink.
//!
//! Passwords are hashed with Argon2id. Every account gets its own random
//! salt, stored next to the PHC hash string. Verification recomputes the
//! hash from the stored salt and compares the raw outputs in constant
//! time.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use thiserror::Error;

use crate::config::HashingConfig;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Hashing parameters were rejected.
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Stored hash or salt cannot be parsed.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password did not match.
    #[error("password verification failed")]
    VerificationFailed,
}

/// Generate a fresh per-account salt.
///
/// 16 random bytes from the OS CSPRNG, encoded as B64.
pub fn generate_salt() -> SaltString {
    SaltString::generate(&mut OsRng)
}

/// Build the Argon2id hasher for new passwords.
fn create_argon2(config: &HashingConfig) -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(
        config.memory_kib,
        config.iterations,
        config.parallelism,
        None,
    )
    .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Rebuild the hasher a stored PHC string was produced with.
fn argon2_for(parsed: &PasswordHash<'_>) -> Result<Argon2<'static>, PasswordError> {
    let algorithm = Algorithm::try_from(parsed.algorithm).map_err(|_| PasswordError::InvalidHash)?;
    let version = match parsed.version {
        Some(v) => Version::try_from(v).map_err(|_| PasswordError::InvalidHash)?,
        None => Version::V0x13,
    };
    let params = Params::try_from(parsed).map_err(|_| PasswordError::InvalidHash)?;
    Ok(Argon2::new(algorithm, version, params))
}

/// Hash a password with the given salt.
///
/// Returns a PHC-formatted string that embeds the salt and parameters.
///
/// # Examples
///
/// ```
/// use tutorlink::auth::{generate_salt, hash_with_salt};
/// use tutorlink::config::HashingConfig;
///
/// let config = HashingConfig { memory_kib: 1024, iterations: 1, parallelism: 1 };
/// let salt = generate_salt();
/// let hash = hash_with_salt("pw123", salt.as_str(), &config).unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_with_salt(
    password: &str,
    salt: &str,
    config: &HashingConfig,
) -> Result<String, PasswordError> {
    let salt = SaltString::from_b64(salt).map_err(|_| PasswordError::InvalidHash)?;
    let hash = create_argon2(config)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored salt and hash.
///
/// The hash is recomputed with the stored salt using the parameters
/// embedded in `stored_hash`; the outputs are compared in constant time.
///
/// # Examples
///
/// ```
/// use tutorlink::auth::{generate_salt, hash_with_salt, verify_with_salt};
/// use tutorlink::config::HashingConfig;
///
/// let config = HashingConfig { memory_kib: 1024, iterations: 1, parallelism: 1 };
/// let salt = generate_salt();
/// let hash = hash_with_salt("pw123", salt.as_str(), &config).unwrap();
/// assert!(verify_with_salt("pw123", salt.as_str(), &hash).is_ok());
/// assert!(verify_with_salt("wrong", salt.as_str(), &hash).is_err());
/// ```
pub fn verify_with_salt(
    password: &str,
    stored_salt: &str,
    stored_hash: &str,
) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| PasswordError::InvalidHash)?;
    let expected = parsed.hash.ok_or(PasswordError::InvalidHash)?;
    let salt = SaltString::from_b64(stored_salt).map_err(|_| PasswordError::InvalidHash)?;

    let candidate = argon2_for(&parsed)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;
    let candidate = candidate.hash.ok_or(PasswordError::InvalidHash)?;

    // Output's PartialEq is constant-time.
    if candidate == expected {
        Ok(())
    } else {
        Err(PasswordError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> HashingConfig {
        HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_generate_salt_is_random_and_long_enough() {
        let a = generate_salt();
        let b = generate_salt();

        assert_ne!(a.as_str(), b.as_str());
        // 16 bytes encode to 22 unpadded B64 characters
        assert!(a.as_str().len() >= 22);
    }

    #[test]
    fn test_hash_with_salt_format() {
        let salt = generate_salt();
        let hash = hash_with_salt("test_password", salt.as_str(), &fast_config()).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
        assert!(hash.contains("m=1024"));
        assert!(hash.contains(salt.as_str()));
    }

    #[test]
    fn test_same_password_different_salts() {
        let config = fast_config();
        let s1 = generate_salt();
        let s2 = generate_salt();

        let h1 = hash_with_salt("same_password", s1.as_str(), &config).unwrap();
        let h2 = hash_with_salt("same_password", s2.as_str(), &config).unwrap();

        assert_ne!(h1, h2);
    }

    #[test]
    fn test_hash_is_deterministic_for_fixed_salt() {
        let config = fast_config();
        let salt = generate_salt();

        let h1 = hash_with_salt("pw", salt.as_str(), &config).unwrap();
        let h2 = hash_with_salt("pw", salt.as_str(), &config).unwrap();

        assert_eq!(h1, h2);
    }

    #[test]
    fn test_verify_correct_password() {
        let salt = generate_salt();
        let hash = hash_with_salt("correct_password", salt.as_str(), &fast_config()).unwrap();

        assert!(verify_with_salt("correct_password", salt.as_str(), &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password() {
        let salt = generate_salt();
        let hash = hash_with_salt("correct_password", salt.as_str(), &fast_config()).unwrap();

        let result = verify_with_salt("wrong_password", salt.as_str(), &hash);
        assert!(matches!(result, Err(PasswordError::VerificationFailed)));
    }

    #[test]
    fn test_verify_with_wrong_salt_fails() {
        let salt = generate_salt();
        let other = generate_salt();
        let hash = hash_with_salt("pw", salt.as_str(), &fast_config()).unwrap();

        let result = verify_with_salt("pw", other.as_str(), &hash);
        assert!(matches!(result, Err(PasswordError::VerificationFailed)));
    }

    #[test]
    fn test_verify_uses_embedded_params() {
        let salt = generate_salt();
        let old = HashingConfig {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        };
        let hash = hash_with_salt("pw", salt.as_str(), &old).unwrap();

        // Verification does not depend on the current configuration.
        assert!(verify_with_salt("pw", salt.as_str(), &hash).is_ok());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let salt = generate_salt();
        let result = verify_with_salt("any", salt.as_str(), "not_a_valid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_invalid_salt_rejected() {
        let result = hash_with_salt("pw", "not b64!", &fast_config());
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let config = HashingConfig {
            memory_kib: 1024,
            iterations: 0,
            parallelism: 1,
        };
        let salt = generate_salt();
        let result = hash_with_salt("pw", salt.as_str(), &config);
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }

    #[test]
    fn test_password_with_unicode() {
        let salt = generate_salt();
        let hash = hash_with_salt("パスワード123", salt.as_str(), &fast_config()).unwrap();
        assert!(verify_with_salt("パスワード123", salt.as_str(), &hash).is_ok());
    }

    #[test]
    fn test_password_error_display() {
        assert_eq!(
            PasswordError::VerificationFailed.to_string(),
            "password verification failed"
        );
        assert_eq!(
            PasswordError::InvalidHash.to_string(),
            "invalid password hash format"
        );
    }
}
