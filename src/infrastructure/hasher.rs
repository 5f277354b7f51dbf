//! Salted SHA-256 implementation of the password hashing capability.
//!
//! Stored verifier format: `"<salt>$<hex digest>"` where the digest is
//! SHA-256 over `salt || plaintext`. The format is an implementation
//! detail of this module; the rest of the system treats the verifier as
//! an opaque string.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::PasswordHasher;

/// Salted SHA-256 password hasher.
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    fn digest_hex(salt: &str, plain: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(plain.as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }
}

impl Default for Sha256PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, plain: &str) -> String {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::digest_hex(&salt, plain);
        format!("{salt}${digest}")
    }

    fn verify(&self, plain: &str, stored: &str) -> bool {
        match stored.split_once('$') {
            Some((salt, digest)) => Self::digest_hex(salt, plain) == digest,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_succeeds() {
        // テスト項目: ハッシュ化したパスワードを検証できる
        // given (前提条件):
        let hasher = Sha256PasswordHasher::new();

        // when (操作):
        let stored = hasher.hash("secret");

        // then (期待する結果):
        assert!(hasher.verify("secret", &stored));
    }

    #[test]
    fn test_verify_wrong_password_fails() {
        // テスト項目: 異なるパスワードでは検証に失敗する
        // given (前提条件):
        let hasher = Sha256PasswordHasher::new();
        let stored = hasher.hash("secret");

        // when / then (期待する結果):
        assert!(!hasher.verify("not-secret", &stored));
    }

    #[test]
    fn test_hash_is_salted() {
        // テスト項目: 同じパスワードでも毎回異なる検証子が生成される
        // given (前提条件):
        let hasher = Sha256PasswordHasher::new();

        // when (操作):
        let stored1 = hasher.hash("secret");
        let stored2 = hasher.hash("secret");

        // then (期待する結果):
        assert_ne!(stored1, stored2);
        assert!(hasher.verify("secret", &stored1));
        assert!(hasher.verify("secret", &stored2));
    }

    #[test]
    fn test_verify_malformed_verifier_fails() {
        // テスト項目: 区切り文字のない検証子は常に検証に失敗する
        // given (前提条件):
        let hasher = Sha256PasswordHasher::new();

        // when / then (期待する結果):
        assert!(!hasher.verify("secret", "no-separator-here"));
    }
}
