//! Argon2 password hashing

use std::sync::OnceLock;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Constant-time comparison against a PHC hash string; malformed hashes never match
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| hash_password("bistro-dummy-password").ok())
        .as_deref()
}

/// Build the dummy hash ahead of the first login; false if hashing failed
pub fn init_dummy_hash() -> bool {
    dummy_hash().is_some()
}

#[cfg(test)]
pub(crate) fn dummy_hash_ready() -> bool {
    DUMMY_HASH.get().is_some_and(Option::is_some)
}

/// Burn one verification against a fixed hash so unknown usernames cost the
/// same as a wrong password.
pub fn verify_dummy(password: &str) {
    if let Some(hash) = dummy_hash() {
        let _ = verify_password(password, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("s3cret", "not-a-hash"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_dummy_hash_ready_after_init() {
        assert!(init_dummy_hash());
        assert!(dummy_hash_ready());
        verify_dummy("anything");
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }
}
