use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use rand::rngs::OsRng;
use std::io;

/// Function to hash a password with PBKDF2-HMAC-SHA256
///
/// The salt is freshly randomized on every call and embedded in the returned
/// PHC string together with the algorithm parameters, so two hashes of the
/// same password never compare equal.
pub fn hash_password(plaintext: &str) -> Result<String, pbkdf2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Pbkdf2.hash_password(plaintext.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Function to verify a password against a stored PHC hash string
///
/// A malformed hash blob counts as a verification failure rather than an
/// error, so callers only ever see a yes/no answer.
pub fn verify_password(plaintext: &str, hash_blob: &str) -> bool {
    match PasswordHash::new(hash_blob) {
        Ok(parsed) => Pbkdf2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Helper function to read a password securely
pub fn read_password() -> io::Result<String> {
    rpassword::read_password()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let hash = hash_password("CorrectHorse9!").unwrap();

        assert!(verify_password("CorrectHorse9!", &hash));
        assert!(!verify_password("WrongHorse9!", &hash));
    }

    #[test]
    fn test_salt_is_randomized() {
        let first = hash_password("SamePassword1!").unwrap();
        let second = hash_password("SamePassword1!").unwrap();

        // Different salts, different strings, but both verify
        assert_ne!(first, second);
        assert!(verify_password("SamePassword1!", &first));
        assert!(verify_password("SamePassword1!", &second));
    }

    #[test]
    fn test_cross_verification_fails() {
        let hash_one = hash_password("PasswordOne1!").unwrap();
        let hash_two = hash_password("PasswordTwo2!").unwrap();

        assert!(!verify_password("PasswordOne1!", &hash_two));
        assert!(!verify_password("PasswordTwo2!", &hash_one));
    }

    #[test]
    fn test_malformed_hash_is_rejected() {
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", "$unknown$v=1$broken"));
    }
}
