use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hashes and verifies passwords with argon2id, peppering the plaintext with
/// the process-wide secret before hashing.
pub struct CredentialVerifier {
    pepper: String,
}

impl CredentialVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            pepper: secret.to_string(),
        }
    }

    pub fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let peppered = format!("{password}{}", self.pepper);
        let digest = Argon2::default()
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
        Ok(digest.to_string())
    }

    /// A malformed digest verifies as `false` — indistinguishable from a
    /// wrong password, so nothing leaks to the caller.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        let peppered = format!("{password}{}", self.pepper);
        Argon2::default()
            .verify_password(peppered.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_correct() {
        let verifier = CredentialVerifier::new("pepper");
        let digest = verifier.hash("password123").unwrap();
        assert!(verifier.verify("password123", &digest));
    }

    #[test]
    fn test_verify_wrong_password() {
        let verifier = CredentialVerifier::new("pepper");
        let digest = verifier.hash("password123").unwrap();
        assert!(!verifier.verify("pass123456", &digest));
    }

    #[test]
    fn test_different_pepper_fails() {
        let digest = CredentialVerifier::new("pepper-1")
            .hash("password123")
            .unwrap();
        assert!(!CredentialVerifier::new("pepper-2").verify("password123", &digest));
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        let verifier = CredentialVerifier::new("pepper");
        let digest1 = verifier.hash("same-password").unwrap();
        let digest2 = verifier.hash("same-password").unwrap();
        assert_ne!(digest1, digest2);
        assert!(verifier.verify("same-password", &digest1));
        assert!(verifier.verify("same-password", &digest2));
    }

    #[test]
    fn test_malformed_digest_is_false_not_error() {
        let verifier = CredentialVerifier::new("pepper");
        assert!(!verifier.verify("password123", "not-a-phc-string"));
        assert!(!verifier.verify("password123", ""));
    }
}
