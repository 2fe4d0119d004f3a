//! PBKDF2-HMAC-SHA256 password digests.
//!
//! Stored format: `pbkdf2-sha256${rounds}${salt}${hex digest}`.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

const SCHEME: &str = "pbkdf2-sha256";
const ROUNDS: u32 = 100_000;
const DIGEST_LEN: usize = 32;

fn digest(password: &str, salt: &str, rounds: u32) -> String {
    let mut out = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), rounds, &mut out);
    out.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!(
        "{SCHEME}${ROUNDS}${salt}${}",
        digest(password, &salt, ROUNDS)
    )
}

/// Checks a password against a stored digest. Malformed digests never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(4, '$');
    let (Some(SCHEME), Some(rounds), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    if rounds == 0 {
        return false;
    }

    let actual = digest(password, salt, rounds);
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let stored = hash_password("correct horse");
        assert!(stored.starts_with("pbkdf2-sha256$100000$"));
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("battery staple", &stored));
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn digest_matches_rfc_7914_vector() {
        // PBKDF2-HMAC-SHA256("passwd", "salt", 1), first 32 bytes.
        assert_eq!(
            digest("passwd", "salt", 1),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn truncated_digest_never_matches() {
        let stored = hash_password("secret");
        let truncated = &stored[..stored.len() - 2];
        assert!(!verify_password("secret", truncated));
    }

    #[test]
    fn malformed_digest_never_matches() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "md5$1$salt$abc"));
        assert!(!verify_password("x", "pbkdf2-sha256$zero$salt$abc"));
        assert!(!verify_password("x", "pbkdf2-sha256$0$salt$abc"));
    }
}
