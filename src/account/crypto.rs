//! Credential hashing, OTP generation, and session token signing.
//!
//! Passwords and OTPs are both "secrets" here: bcrypt with a per-call random
//! salt, verified in constant time against the self-contained digest. The
//! source system hashed with cost 7; the cost stays configurable but keeps
//! that default.

use anyhow::{anyhow, Context, Result};
use jsonwebtoken::{encode, EncodingKey, Header};
use rand::{rngs::OsRng, Rng};
use secrecy::{ExposeSecret, SecretString};
use tracing::error;

use crate::account::models::SessionClaims;

/// bcrypt work factor used by the source system.
pub const DEFAULT_BCRYPT_COST: u32 = 7;

/// Number of digits in a one-time code.
pub const OTP_LEN: usize = 4;

/// Hash a secret (password or OTP) with a fresh random salt.
///
/// # Errors
/// Returns an error for an empty secret or an out-of-range cost; both are
/// caller bugs surfaced as infrastructure faults rather than swallowed.
pub fn hash_secret(secret: &str, cost: u32) -> Result<String> {
    if secret.is_empty() {
        return Err(anyhow!("refusing to hash an empty secret"));
    }
    bcrypt::hash(secret, cost).context("bcrypt hash failed")
}

/// Verify a candidate against a stored digest.
///
/// Never fails: a malformed digest is logged and treated as a mismatch, so a
/// corrupt row degrades to a rejected credential instead of a 500.
#[must_use]
pub fn verify_secret(digest: &str, candidate: &str) -> bool {
    match bcrypt::verify(candidate, digest) {
        Ok(matched) => matched,
        Err(err) => {
            error!("Malformed credential digest: {err}");
            false
        }
    }
}

/// Generate a 4-digit numeric one-time code, leading zeros allowed.
///
/// Digits are drawn independently from the OS CSPRNG; the 4-digit numeric
/// contract is what callers depend on, not the randomness source.
#[must_use]
pub fn generate_otp() -> String {
    let mut otp = String::with_capacity(OTP_LEN);
    for _ in 0..OTP_LEN {
        let digit: u8 = OsRng.gen_range(0..10);
        otp.push(char::from(b'0' + digit));
    }
    otp
}

/// Signs session claims into a compact JWT (HS256).
///
/// The signing secret is process-wide configuration; an empty secret is a
/// fatal misconfiguration and fails issuance outright instead of returning
/// an empty token.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: SecretString,
    session_ttl_seconds: Option<i64>,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: SecretString, session_ttl_seconds: Option<i64>) -> Self {
        Self {
            secret,
            session_ttl_seconds,
        }
    }

    /// Sign the claims, stamping `exp` only when a session TTL is configured.
    ///
    /// # Errors
    /// Returns an error if the secret is empty or signing fails.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String> {
        let secret = self.secret.expose_secret();
        if secret.is_empty() {
            return Err(anyhow!("session token signing key is not configured"));
        }

        let mut claims = claims.clone();
        if let Some(ttl) = self.session_ttl_seconds {
            claims.exp = Some(chrono::Utc::now().timestamp() + ttl);
        }

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .context("failed to sign session token")
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"***")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn claims() -> SessionClaims {
        SessionClaims {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            verified: true,
            exp: None,
        }
    }

    #[test]
    fn hash_then_verify_round_trips() {
        let digest = hash_secret("Abcdefg1!", DEFAULT_BCRYPT_COST).unwrap();
        assert!(verify_secret(&digest, "Abcdefg1!"));
        assert!(!verify_secret(&digest, "Abcdefg1?"));
    }

    #[test]
    fn hash_is_salted_per_call() {
        let first = hash_secret("1234", DEFAULT_BCRYPT_COST).unwrap();
        let second = hash_secret("1234", DEFAULT_BCRYPT_COST).unwrap();
        assert_ne!(first, second);
        assert!(verify_secret(&first, "1234"));
        assert!(verify_secret(&second, "1234"));
    }

    #[test]
    fn hash_rejects_empty_secret() {
        assert!(hash_secret("", DEFAULT_BCRYPT_COST).is_err());
    }

    #[test]
    fn verify_tolerates_malformed_digest() {
        assert!(!verify_secret("not-a-bcrypt-digest", "1234"));
        assert!(!verify_secret("", "1234"));
    }

    #[test]
    fn otp_is_four_digits() {
        for _ in 0..32 {
            let otp = generate_otp();
            assert_eq!(otp.len(), OTP_LEN);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn issue_signs_decodable_claims() {
        let issuer = TokenIssuer::new(SecretString::from("test-secret"), None);
        let token = issuer.issue(&claims()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        let decoded = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap();
        assert_eq!(decoded.claims.first_name, "Ada");
        assert!(decoded.claims.verified);
        assert!(decoded.claims.exp.is_none());
    }

    #[test]
    fn issue_stamps_exp_when_ttl_configured() {
        let issuer = TokenIssuer::new(SecretString::from("test-secret"), Some(3600));
        let token = issuer.issue(&claims()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let decoded = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap();
        let exp = decoded.claims.exp.unwrap();
        assert!(exp > chrono::Utc::now().timestamp());
    }

    #[test]
    fn issue_fails_without_secret() {
        let issuer = TokenIssuer::new(SecretString::from(""), None);
        assert!(issuer.issue(&claims()).is_err());
    }
}
