use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Fixed lifetime of an identity token.
pub const TOKEN_VALIDITY_HOURS: i64 = 24;

/// Issues and verifies identity tokens.
///
/// Tokens are HS256 JWTs carrying `sub`, `iat` and `exp`. Verification is
/// stateless: there is no revocation list, so expiry is the only way a token
/// stops working, and rotating the secret invalidates every outstanding token.
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl TokenAuthority {
    /// Create an authority signing with `secret`.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256. This
    ///   constructor accepts any length; callers loading the secret from
    ///   configuration are expected to enforce the minimum
    /// - Load it from configuration or a vault, never from code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity: Duration::hours(TOKEN_VALIDITY_HOURS),
        }
    }

    /// Issue a token for `subject`, valid from now.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the clock read `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::for_subject(subject, issued_at, self.validity);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the clock read `now`.
    ///
    /// Signature and structure are checked before expiry, so a tampered
    /// expired token reports `Invalid`.
    ///
    /// # Errors
    /// * `Invalid` - Bad signature, wrong algorithm, or malformed token/claims
    /// * `Expired` - `now` is strictly past the `exp` claim
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the supplied clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
